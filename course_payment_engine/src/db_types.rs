use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use cps_common::Money;
use log::error;
use serde::{Deserialize, Serialize};
pub use sqlx::types::Json;
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------        Role        ---------------------------------------------------------
/// The role stored on a learner profile. This field is the single source of truth for authorization decisions;
/// role claims carried in session tokens are advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Instructor => write!(f, "instructor"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid role: {0}")]
pub struct RoleConversionError(String);

impl FromStr for Role {
    type Err = RoleConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "instructor" => Ok(Self::Instructor),
            "admin" => Ok(Self::Admin),
            s => Err(RoleConversionError(s.to_string())),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid role in database: {value}. Defaulting to student.");
            Role::Student
        })
    }
}

//--------------------------------------      CourseId      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(transparent)]
pub struct CourseId(pub String);

impl FromStr for CourseId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for CourseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CourseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl CourseId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------       OrderId      ---------------------------------------------------------
/// The order handle issued by the checkout gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------   LearnerProfile   ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub id: i64,
    /// The identity provider's stable subject id for this user.
    pub subject_id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    /// Running earnings balance. Only meaningful for instructors; zero for everyone else.
    pub earnings: Money,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLearnerProfile {
    pub subject_id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

impl NewLearnerProfile {
    pub fn new(subject_id: impl Into<String>, display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            display_name: display_name.into(),
            email: email.into(),
            role: Role::Student,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

//--------------------------------------     Curriculum     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Video,
    Pdf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub content_url: String,
    pub content_kind: ContentKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub lessons: Vec<Lesson>,
}

//--------------------------------------       Course       ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    /// The price in minor units. Authoritative at order-creation time; verification charges the price frozen on
    /// the checkout order when one exists.
    pub price: Money,
    pub category: Option<String>,
    /// The owning instructor's identity-provider subject id.
    pub instructor_id: String,
    pub instructor_name: Option<String>,
    pub curriculum: Json<Vec<Chapter>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub price: Money,
    pub category: Option<String>,
    pub instructor_id: String,
    pub instructor_name: Option<String>,
    pub curriculum: Vec<Chapter>,
}

impl NewCourse {
    pub fn new(course_id: CourseId, title: impl Into<String>, price: Money, instructor_id: impl Into<String>) -> Self {
        Self {
            course_id,
            title: title.into(),
            description: String::new(),
            price,
            category: None,
            instructor_id: instructor_id.into(),
            instructor_name: None,
            curriculum: Vec::new(),
        }
    }
}

//--------------------------------------    CheckoutOrder   ---------------------------------------------------------
/// A gateway order persisted at creation time. Storing the amount here freezes the price the learner saw at
/// checkout, so a later price change on the course cannot alter what the verification step charges.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CheckoutOrder {
    pub id: i64,
    pub order_id: OrderId,
    pub course_id: CourseId,
    pub subject_id: String,
    pub amount: Money,
    pub currency: String,
    pub receipt: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCheckoutOrder {
    pub order_id: OrderId,
    pub course_id: CourseId,
    pub subject_id: String,
    pub amount: Money,
    pub currency: String,
    pub receipt: String,
}

//--------------------------------------     Enrollment     ---------------------------------------------------------
/// The relation between exactly one learner and exactly one course. At most one row exists per
/// (learner, course) pair, enforced by a unique key and upsert-by-key.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub learner_id: i64,
    pub course_id: CourseId,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------    PaymentRecord   ---------------------------------------------------------
/// An entry in the append-only payment ledger. Keyed on the gateway payment id, so a replayed confirmation
/// cannot append a second row for the same payment. Never updated or deleted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: i64,
    pub payment_id: String,
    pub order_id: OrderId,
    pub learner_id: i64,
    pub course_id: CourseId,
    pub instructor_id: String,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPaymentRecord {
    pub payment_id: String,
    pub order_id: OrderId,
    pub learner_id: i64,
    pub course_id: CourseId,
    pub instructor_id: String,
    pub amount: Money,
}

//-------------------------------------- PaymentConfirmation -------------------------------------------------------
/// The payload the client submits after completing the gateway's hosted checkout flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub order_id: OrderId,
    pub payment_id: String,
    /// Hex-rendered HMAC-SHA256 over `order_id|payment_id`, issued by the gateway.
    pub signature: String,
    pub course_id: CourseId,
}
