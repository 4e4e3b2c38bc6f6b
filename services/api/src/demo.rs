use caregivers::catalog::{
    Appointment, AppointmentCreatePayload, Caregiver, CaregiverCreatePayload, FamilyMember,
    FamilyMemberCreatePayload, JobApplication, JobApplicationCreatePayload, JobPost,
    JobPostCreatePayload, Message, MessageCreatePayload, Participant,
};
use caregivers::error::AppError;
use caregivers::marketplace::{
    ApplicationQuery, CaregiverQuery, InMemoryMarketplace, MarketplaceError,
    MarketplaceRepository, MarketplaceService,
};
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date of the first sample appointment (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) first_visit: Option<NaiveDate>,
    /// Only list caregivers offering this type of care.
    #[arg(long)]
    pub(crate) caregiver_type: Option<String>,
    /// Only list caregivers whose city contains this text.
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Only list caregivers charging at most this hourly rate.
    #[arg(long)]
    pub(crate) max_rate: Option<f64>,
}

/// Records created by [`seed_marketplace`], in insertion order.
#[derive(Debug, Default)]
pub(crate) struct SeededMarketplace {
    pub(crate) caregivers: Vec<Caregiver>,
    pub(crate) families: Vec<FamilyMember>,
    pub(crate) job_posts: Vec<JobPost>,
    pub(crate) applications: Vec<JobApplication>,
    pub(crate) appointments: Vec<Appointment>,
    pub(crate) messages: Vec<Message>,
}

const CAREGIVERS: [(&str, &str, &str, &str, &str, &str, f64, &str); 4] = [
    (
        "Arman",
        "Armanov",
        "Babysitter",
        "Male",
        "arman@example.com",
        "+77771234567",
        9.5,
        "Certified babysitter with early childhood CPR training",
    ),
    (
        "Dana",
        "Zhan",
        "Elderly Care",
        "Female",
        "dana@example.com",
        "+77772345678",
        12.0,
        "Experienced nurse specialized in elder care",
    ),
    (
        "Timur",
        "Bekov",
        "Babysitter",
        "Male",
        "timur@example.com",
        "+77773456789",
        11.0,
        "STEM tutor and bilingual babysitter",
    ),
    (
        "Madina",
        "Sadyk",
        "Special Needs",
        "Female",
        "madina@example.com",
        "+77774567890",
        16.0,
        "Special education assistant with ten years of experience",
    ),
];

const FAMILIES: [(&str, &str, &str, &str, &str, &str, &str); 4] = [
    (
        "Amina",
        "Aminova",
        "amina@example.com",
        "+77770000001",
        "45 Kabanbay Batyr Street",
        "Daughter, 4 years old",
        "No pets, quiet after 21:00",
    ),
    (
        "Bolat",
        "Bolatov",
        "bolat@example.com",
        "+77770000002",
        "12 Dostyk Avenue",
        "Father, 72 years old",
        "No pets.",
    ),
    (
        "Kamila",
        "Sultanova",
        "kamila@example.com",
        "+77770000003",
        "78 Turan Avenue",
        "Son, 3 years old",
        "No smoking indoors",
    ),
    (
        "Yerbol",
        "Nurtay",
        "yerbol@example.com",
        "+77770000004",
        "23 Mangilik El Avenue",
        "Mother, 80 years old",
        "Quiet hours after 22:00",
    ),
];

/// Family index, title, care type, recipient age, description, slot, frequency, requirements.
const JOB_POSTS: [(usize, &str, &str, u32, &str, &str, &str, &str); 4] = [
    (
        0,
        "Evening Babysitter",
        "Babysitter",
        4,
        "Need help with evening routine for preschooler",
        "Weekdays 18:00-21:00",
        "Weekdays",
        "Energetic, soft-spoken, patient",
    ),
    (
        1,
        "Companion for Elderly Parent",
        "Elderly Care",
        72,
        "Provide companionship and light exercise support",
        "Daily 09:00-12:00",
        "Daily",
        "Must be soft-spoken and punctual",
    ),
    (
        2,
        "Weekend Babysitter",
        "Babysitter",
        3,
        "Focus on creative play and meal prep for toddler",
        "Weekends 10:00-16:00",
        "Weekends",
        "Comfortable with toddlers; creative play",
    ),
    (
        3,
        "Overnight Elderly Care",
        "Elderly Care",
        80,
        "Overnight supervision and medication reminders",
        "Weekdays 22:00-06:00",
        "Weeknights",
        "Experienced with medication schedules",
    ),
];

/// Job post index, caregiver index, cover message, status.
const APPLICATIONS: [(usize, usize, &str, &str); 6] = [
    (1, 1, "I have eight years supporting elders with dementia.", "accepted"),
    (2, 0, "Weekend availability and Montessori training.", "accepted"),
    (2, 2, "STEM tutor offering creative activities.", "applied"),
    (3, 1, "Comfortable with overnight schedules and medication.", "applied"),
    (1, 0, "Bilingual support and light cooking.", "applied"),
    (2, 3, "Experienced in special needs childcare.", "applied"),
];

/// Caregiver index, family index, days after the first visit, start hour, hours, status, notes.
const APPOINTMENTS: [(usize, usize, i64, i64, f64, &str, &str); 5] = [
    (1, 1, 0, 9, 4.0, "accepted", "Morning companionship session"),
    (0, 2, 1, 10, 5.0, "accepted", "Weekend creative activities"),
    (2, 2, 2, 12, 3.0, "accepted", "Afternoon tutoring and play"),
    (1, 3, 4, 22, 8.0, "accepted", "Overnight supervision and medication"),
    (3, 3, 5, 22, 6.0, "pending", "Trial overnight shift"),
];

/// Loads the sample Astana marketplace through the service, so every record passes the same
/// validation and reference checks as API traffic.
pub(crate) fn seed_marketplace<R>(
    service: &MarketplaceService<R>,
    first_visit: NaiveDate,
) -> Result<SeededMarketplace, MarketplaceError>
where
    R: MarketplaceRepository + 'static,
{
    let mut seeded = SeededMarketplace::default();

    for (first_name, last_name, caregiver_type, gender, email, phone, hourly_rate, bio) in
        CAREGIVERS
    {
        seeded.caregivers.push(service.create_caregiver(CaregiverCreatePayload {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            caregiver_type: caregiver_type.to_string(),
            gender: Some(gender.to_string()),
            photo_url: None,
            email: email.to_string(),
            phone: phone.to_string(),
            city: "Astana".to_string(),
            hourly_rate,
            bio: Some(bio.to_string()),
            password: format!("hashed_pw_{}", first_name.to_lowercase()),
        })?);
    }

    for (first_name, last_name, email, phone, address, recipient, rules) in FAMILIES {
        seeded.families.push(service.create_family(FamilyMemberCreatePayload {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            city: "Astana".to_string(),
            address: Some(address.to_string()),
            care_recipient_info: Some(recipient.to_string()),
            house_rules: Some(rules.to_string()),
            password: format!("hashed_pw_{}", first_name.to_lowercase()),
        })?);
    }

    for (family, title, caregiver_type, age, description, slot, frequency, requirements) in
        JOB_POSTS
    {
        seeded.job_posts.push(service.create_job_post(JobPostCreatePayload {
            family_id: seeded.families[family].id,
            title: title.to_string(),
            caregiver_type: caregiver_type.to_string(),
            city: "Astana".to_string(),
            care_recipient_age: Some(age),
            description: Some(description.to_string()),
            preferred_time_slots: vec![slot.to_string()],
            frequency: Some(frequency.to_string()),
            requirements: Some(requirements.to_string()),
        })?);
    }

    for (post, caregiver, cover_message, status) in APPLICATIONS {
        seeded
            .applications
            .push(service.create_application(JobApplicationCreatePayload {
                job_post_id: seeded.job_posts[post].id,
                caregiver_id: seeded.caregivers[caregiver].id,
                cover_message: Some(cover_message.to_string()),
                status: Some(status.to_string()),
            })?);
    }

    for (caregiver, family, offset, hour, duration_hours, status, notes) in APPOINTMENTS {
        seeded
            .appointments
            .push(service.create_appointment(AppointmentCreatePayload {
                caregiver_id: seeded.caregivers[caregiver].id,
                family_id: seeded.families[family].id,
                appointment_date: first_visit + Duration::days(offset),
                start_time: NaiveTime::default() + Duration::hours(hour),
                duration_hours,
                status: Some(status.to_string()),
                notes: Some(notes.to_string()),
            })?);
    }

    let conversations = [
        (
            Participant::Family(seeded.families[1].id),
            Participant::Caregiver(seeded.caregivers[1].id),
            "We appreciate your support with our father.",
        ),
        (
            Participant::Caregiver(seeded.caregivers[0].id),
            Participant::Family(seeded.families[2].id),
            "Looking forward to the weekend appointment.",
        ),
    ];
    for (sender, receiver, content) in conversations {
        seeded
            .messages
            .push(service.send_message(MessageCreatePayload::new(sender, receiver, content))?);
    }

    Ok(seeded)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        first_visit,
        caregiver_type,
        city,
        max_rate,
    } = args;
    let first_visit = first_visit.unwrap_or_else(|| Local::now().date_naive());

    let service = MarketplaceService::new(Arc::new(InMemoryMarketplace::default()));
    let seeded = seed_marketplace(&service, first_visit)?;

    println!("Caregivers platform demo (sample Astana marketplace)");

    let directory = service.list_caregivers(&CaregiverQuery {
        caregiver_type,
        city,
        min_rate: None,
        max_rate,
    })?;
    println!("\nCaregiver directory ({} matching)", directory.len());
    for caregiver in &directory {
        println!(
            "- {} {} | {} | {} | {:.2}/h",
            caregiver.first_name,
            caregiver.last_name,
            caregiver.caregiver_type,
            caregiver.city,
            caregiver.hourly_rate
        );
    }

    println!("\nJob board");
    for post in service.list_job_posts(&Default::default())? {
        let family = post
            .family
            .as_hydrated()
            .map(|family| format!("{} {}", family.first_name, family.last_name))
            .unwrap_or_else(|| "unknown family".to_string());
        println!(
            "- {} ({}) posted by {} | {}",
            post.title,
            post.caregiver_type,
            family,
            post.preferred_time_slots.join(", ")
        );
        let applications = service.list_applications(&ApplicationQuery {
            job_post_id: Some(post.id),
            caregiver_id: None,
        })?;
        for application in applications {
            let applicant = application
                .caregiver
                .as_hydrated()
                .map(|caregiver| format!("{} {}", caregiver.first_name, caregiver.last_name))
                .unwrap_or_else(|| format!("caregiver {}", application.caregiver_id));
            println!("    * {applicant}: {}", application.status);
        }
    }

    println!("\nAppointments");
    for appointment in service.list_appointments(&Default::default())? {
        let caregiver = appointment
            .caregiver
            .as_hydrated()
            .map(|caregiver| caregiver.first_name.clone())
            .unwrap_or_default();
        let family = appointment
            .family
            .as_hydrated()
            .map(|family| family.last_name.clone())
            .unwrap_or_default();
        println!(
            "- {} {} for {:.1}h | {} with the {} family | {}",
            appointment.appointment_date,
            appointment.start_time.format("%H:%M"),
            appointment.duration_hours,
            caregiver,
            family,
            appointment.status
        );
    }

    println!("\nMessages");
    for message in service.list_messages(&Default::default())? {
        let (Some(sender), Some(receiver)) = (message.sender(), message.receiver()) else {
            continue;
        };
        println!(
            "- {} -> {}: {}",
            describe(&seeded, sender),
            describe(&seeded, receiver),
            message.content
        );
    }

    Ok(())
}

fn describe(seeded: &SeededMarketplace, participant: Participant) -> String {
    match participant {
        Participant::Family(id) => seeded
            .families
            .iter()
            .find(|family| family.id == id)
            .map(|family| format!("{} {}", family.first_name, family.last_name))
            .unwrap_or_else(|| format!("family {id}")),
        Participant::Caregiver(id) => seeded
            .caregivers
            .iter()
            .find(|caregiver| caregiver.id == id)
            .map(|caregiver| format!("{} {}", caregiver.first_name, caregiver.last_name))
            .unwrap_or_else(|| format!("caregiver {id}")),
    }
}
