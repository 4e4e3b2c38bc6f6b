use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A related record the API may have joined into a response for display.
///
/// The foreign key always lives next to this field; `NotHydrated` only says the server did not
/// include the summary, not that the relation is missing. On the wire it is `null`, and a
/// response that omits the field reads as `NotHydrated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embedded<T> {
    Hydrated(T),
    NotHydrated,
}

impl<T> Embedded<T> {
    pub fn as_hydrated(&self) -> Option<&T> {
        match self {
            Embedded::Hydrated(value) => Some(value),
            Embedded::NotHydrated => None,
        }
    }

    pub fn is_hydrated(&self) -> bool {
        matches!(self, Embedded::Hydrated(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Embedded::Hydrated(value) => Some(value),
            Embedded::NotHydrated => None,
        }
    }
}

impl<T> Default for Embedded<T> {
    fn default() -> Self {
        Embedded::NotHydrated
    }
}

impl<T> From<Option<T>> for Embedded<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => Embedded::Hydrated(inner),
            None => Embedded::NotHydrated,
        }
    }
}

impl<T: Serialize> Serialize for Embedded<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_hydrated().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Embedded<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Embedded::from)
    }
}
