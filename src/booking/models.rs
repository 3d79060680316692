//! Domain models for bookings, assignments and the people around them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::BookingStatus;
use crate::core_types::{AssignmentId, BookingId, LanguageId, UserId};

// ============================================================================
// Enums
// ============================================================================

/// Gender requirement on a booking / gender of a translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Payment class of a booking, fixed at creation from the customer's
/// consumer category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Paid,
    Rws,
    Unpaid,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Paid => "paid",
            JobType::Rws => "rws",
            JobType::Unpaid => "unpaid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(JobType::Paid),
            "rws" => Some(JobType::Rws),
            "unpaid" => Some(JobType::Unpaid),
            _ => None,
        }
    }
}

/// Consumer category of a customer account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumerType {
    Paid,
    #[serde(rename = "rwsconsumer")]
    RwsConsumer,
    Ngo,
}

impl ConsumerType {
    /// Bookings created by this customer get this job type.
    pub fn job_type(&self) -> JobType {
        match self {
            ConsumerType::Paid => JobType::Paid,
            ConsumerType::RwsConsumer => JobType::Rws,
            ConsumerType::Ngo => JobType::Unpaid,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(ConsumerType::Paid),
            "rwsconsumer" => Some(ConsumerType::RwsConsumer),
            "ngo" => Some(ConsumerType::Ngo),
            _ => None,
        }
    }
}

/// Kind of translator account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorType {
    Professional,
    #[serde(rename = "rwstranslator")]
    RwsTranslator,
    Volunteer,
}

impl TranslatorType {
    /// The job type this translator kind is allowed to serve.
    /// Volunteers (and anything unrecognized upstream) serve unpaid work.
    pub fn job_type(&self) -> JobType {
        match self {
            TranslatorType::Professional => JobType::Paid,
            TranslatorType::RwsTranslator => JobType::Rws,
            TranslatorType::Volunteer => JobType::Unpaid,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "professional" => Some(TranslatorType::Professional),
            "rwstranslator" => Some(TranslatorType::RwsTranslator),
            "volunteer" => Some(TranslatorType::Volunteer),
            _ => None,
        }
    }
}

/// Certification requirement tag on a booking.
///
/// The `N*` variants mean "layman level OR the named certified level" and
/// only arise when the customer ticks both boxes at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationRequirement {
    Yes,
    Law,
    Health,
    Normal,
    Both,
    NLaw,
    NHealth,
}

impl CertificationRequirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificationRequirement::Yes => "yes",
            CertificationRequirement::Law => "law",
            CertificationRequirement::Health => "health",
            CertificationRequirement::Normal => "normal",
            CertificationRequirement::Both => "both",
            CertificationRequirement::NLaw => "n_law",
            CertificationRequirement::NHealth => "n_health",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "yes" => Some(CertificationRequirement::Yes),
            "law" => Some(CertificationRequirement::Law),
            "health" => Some(CertificationRequirement::Health),
            "normal" => Some(CertificationRequirement::Normal),
            "both" => Some(CertificationRequirement::Both),
            "n_law" => Some(CertificationRequirement::NLaw),
            "n_health" => Some(CertificationRequirement::NHealth),
            _ => None,
        }
    }

    /// Derive the stored requirement from the checkboxes on the booking form.
    ///
    /// `normal` combined with a certified flag produces the union variants
    /// (`both`, `n_law`, `n_health`); a certified flag alone wins over none.
    pub fn from_request_flags(
        normal: bool,
        certified: bool,
        law: bool,
        health: bool,
    ) -> Option<Self> {
        let base = if certified {
            Some(CertificationRequirement::Yes)
        } else if law {
            Some(CertificationRequirement::Law)
        } else if health {
            Some(CertificationRequirement::Health)
        } else if normal {
            Some(CertificationRequirement::Normal)
        } else {
            None
        };

        if normal {
            if certified {
                return Some(CertificationRequirement::Both);
            }
            if law {
                return Some(CertificationRequirement::NLaw);
            }
            if health {
                return Some(CertificationRequirement::NHealth);
            }
        }
        base
    }
}

/// Certification level held by a translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificationLevel {
    Certified,
    CertifiedLaw,
    CertifiedHealth,
    Layman,
    CourseTrained,
}

impl CertificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificationLevel::Certified => "certified",
            CertificationLevel::CertifiedLaw => "certified_law",
            CertificationLevel::CertifiedHealth => "certified_health",
            CertificationLevel::Layman => "layman",
            CertificationLevel::CourseTrained => "course_trained",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "certified" => Some(CertificationLevel::Certified),
            "certified_law" => Some(CertificationLevel::CertifiedLaw),
            "certified_health" => Some(CertificationLevel::CertifiedHealth),
            "layman" => Some(CertificationLevel::Layman),
            "course_trained" => Some(CertificationLevel::CourseTrained),
            _ => None,
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// A requested interpretation job
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: BookingId,
    pub customer_id: UserId,
    pub from_language_id: LanguageId,
    pub due: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: BookingStatus,
    pub immediate: bool,
    pub gender: Option<Gender>,
    pub certified: Option<CertificationRequirement>,
    pub job_type: JobType,
    pub physical_type: bool,
    pub phone_type: bool,
    /// Contact override; falls back to the customer's account email.
    pub customer_email: Option<String>,
    /// Meeting town override; falls back to the customer's profile town.
    pub town: Option<String>,
    pub admin_comments: Option<String>,
    pub reference: Option<String>,
    pub withdraw_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub session_time_secs: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub will_expire_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Physical presence requested without a phone fallback. Only these
    /// bookings constrain translators by service area.
    #[inline]
    pub fn is_physical_only(&self) -> bool {
        self.physical_type && !self.phone_type
    }
}

/// A translator's claim on a booking over an interval.
///
/// At most one assignment per booking has both `cancel_at` and
/// `completed_at` unset; closure is monotonic.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub booking_id: BookingId,
    pub translator_user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub cancel_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<UserId>,
}

impl Assignment {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.cancel_at.is_none() && self.completed_at.is_none()
    }
}

/// Read-only translator profile used by matching and fan-out
#[derive(Debug, Clone, Serialize)]
pub struct TranslatorProfile {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub translator_type: TranslatorType,
    pub gender: Option<Gender>,
    pub certification_level: CertificationLevel,
    pub languages: Vec<LanguageId>,
    pub town: Option<String>,
    pub opt_out_push: bool,
    pub opt_out_night_push: bool,
    pub opt_out_emergency: bool,
}

/// Customer account data the core needs
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub town: Option<String>,
    pub consumer_type: ConsumerType,
}

impl Booking {
    /// Address to reach the customer on: the per-booking override wins.
    pub fn contact_email<'a>(&'a self, customer: &'a Customer) -> &'a str {
        match &self.customer_email {
            Some(e) if !e.is_empty() => e,
            _ => &customer.email,
        }
    }
}
