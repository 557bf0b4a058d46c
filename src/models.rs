use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::model::attendance::AttendanceStatus;

pub const DEFAULT_EMPLOYEE_LIMIT: u32 = 100;
pub const DEFAULT_ATTENDANCE_LIMIT: u32 = 1000;

/// Raw body of `POST /employees`. Only usable once turned into a [`NewEmployee`].
#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployeeCreate {
    #[schema(example = "E001")]
    pub employee_id: String,
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    #[schema(example = "jane@co.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

/// A trimmed, lowercased-email employee that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewEmployee {
    #[validate(length(min = 1, message = "employee_id cannot be empty or whitespace"))]
    employee_id: String,
    #[validate(length(min = 1, message = "full_name cannot be empty or whitespace"))]
    full_name: String,
    #[validate(
        email(message = "email is not a valid email address"),
        custom(function = "dotted_domain", message = "email is not a valid email address")
    )]
    email: String,
    #[validate(length(min = 1, message = "department cannot be empty or whitespace"))]
    department: String,
}

impl NewEmployee {
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn department(&self) -> &str {
        &self.department
    }
}

impl TryFrom<EmployeeCreate> for NewEmployee {
    type Error = AppError;

    fn try_from(payload: EmployeeCreate) -> Result<Self, Self::Error> {
        let employee = NewEmployee {
            employee_id: payload.employee_id.trim().to_string(),
            full_name: payload.full_name.trim().to_string(),
            email: normalize_email(&payload.email),
            department: payload.department.trim().to_string(),
        };

        employee
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(employee)
    }
}

/// The domain must be a dotted host name; bare hosts and `[ip]` literals are refused.
fn dotted_domain(email: &str) -> Result<(), ValidationError> {
    let domain = email.rsplit_once('@').map(|(_, domain)| domain).unwrap_or_default();

    let dotted = !domain.starts_with('[')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty());

    if dotted {
        Ok(())
    } else {
        Err(ValidationError::new("email_domain"))
    }
}

/// Emails are compared and stored trimmed and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Body of `POST /attendance`. Fully typed, so deserializing it is the validation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AttendanceCreate {
    /// Internal id of the employee.
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "2024-01-10", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Body of `PUT /attendance/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AttendanceStatusUpdate {
    pub status: AttendanceStatus,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Records to skip, default 0
    pub skip: Option<u32>,
    /// Maximum records to return
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn skip(&self) -> u32 {
        self.skip.unwrap_or(0)
    }

    pub fn limit_or(&self, default: u32) -> u32 {
        self.limit.unwrap_or(default)
    }
}
