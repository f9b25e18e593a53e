//! Loan handlers
//!
//! Endpoints for submitting, listing and reviewing loan applications.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::loan_validator::is_valid_email;
use crate::auth::AuthenticatedUser;
use crate::domain::entities::{
    Loan, LoanApplication, LoanId, LoanPageView, LoanSortField, Page, PageRequest,
    DEFAULT_LOAN_TYPE_ID,
};
use crate::error::{AppError, LoanError};
use crate::handlers::ApiResponse;
use crate::AppState;

/// Request to submit a loan
///
/// Every field is optional on the wire so that the validator can report all
/// missing fields at once.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanRequest {
    pub amount: Option<Decimal>,
    pub term_months: Option<i32>,
    pub email: Option<String>,
    pub document_number: Option<String>,
    #[serde(default = "default_loan_type")]
    pub loan_type_id: i32,
}

fn default_loan_type() -> i32 {
    DEFAULT_LOAN_TYPE_ID
}

impl From<CreateLoanRequest> for LoanApplication {
    fn from(req: CreateLoanRequest) -> Self {
        LoanApplication {
            amount: req.amount,
            term_months: req.term_months,
            email: req.email,
            document_number: req.document_number,
            loan_type_id: req.loan_type_id,
        }
    }
}

/// Query parameters for listing loans
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLoansQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_size() -> u32 {
    2
}

fn default_sort_by() -> String {
    "email".to_string()
}

fn default_filter() -> String {
    "Pending Review".to_string()
}

impl TryFrom<ListLoansQuery> for PageRequest {
    type Error = AppError;

    fn try_from(query: ListLoansQuery) -> Result<Self, Self::Error> {
        if query.size == 0 {
            return Err(AppError::BadRequest(
                "Page size must be at least 1".to_string(),
            ));
        }

        let sort_by: LoanSortField = query.sort_by.parse().map_err(AppError::BadRequest)?;

        Ok(PageRequest {
            page: query.page,
            size: query.size,
            sort_by,
            filter: query.filter,
        })
    }
}

/// Request to move a loan to another status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// A loan as returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    pub loan_id: Uuid,
    pub amount: Decimal,
    pub term_months: i32,
    pub email: String,
    pub document_number: String,
    pub loan_type_id: i32,
    pub loan_status_id: i32,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        LoanResponse {
            loan_id: loan.id.0,
            amount: loan.amount,
            term_months: loan.term_months,
            email: loan.email,
            document_number: loan.document_number,
            loan_type_id: loan.loan_type_id,
            loan_status_id: loan.loan_status_id,
        }
    }
}

fn require_reviewer(reviewer_roles: &[String], user: &AuthenticatedUser) -> Result<(), AppError> {
    if user.has_any_role(reviewer_roles) {
        Ok(())
    } else {
        tracing::debug!(email = %user.email, roles = ?user.roles, "Reviewer role required");
        Err(AppError::Forbidden)
    }
}

/// Applicants may only submit for themselves. Absent or malformed emails are
/// left to the validator so every field error is reported together.
fn require_own_email(email: Option<&str>, user: &AuthenticatedUser) -> Result<(), AppError> {
    match email {
        Some(email) if is_valid_email(email) && email != user.email => {
            tracing::debug!(requested = email, subject = %user.email, "Email does not match token");
            Err(LoanError::Unauthorized(email.to_string()).into())
        }
        _ => Ok(()),
    }
}

type Created<T> = (
    StatusCode,
    [(header::HeaderName, String); 1],
    Json<ApiResponse<T>>,
);

fn created_loan(loans_path: &str, loan: Loan) -> Created<LoanResponse> {
    let location = format!("{}/{}", loans_path, loan.id);

    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(
            StatusCode::CREATED,
            "Loan submitted successfully",
            loan.into(),
        )),
    )
}

/// POST /api/v1/loans
///
/// Submit a loan application for the authenticated user.
pub async fn create_loan(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateLoanRequest>,
) -> Result<Created<LoanResponse>, AppError> {
    tracing::trace!(?req, "Received loan application");

    require_own_email(req.email.as_deref(), &user)?;

    let loan = state
        .loan_service
        .create_loan_application(&req.into(), &user.token)
        .await?;

    tracing::debug!(loan_id = %loan.id, "Loan submitted successfully");

    Ok(created_loan(&state.config.loans_path, loan))
}

/// GET /api/v1/loans
///
/// Paginated loans in a status (default "Pending Review"), enriched with
/// applicant data. Reviewers only.
pub async fn list_pending_loans(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListLoansQuery>,
) -> Result<Json<ApiResponse<Page<LoanPageView>>>, AppError> {
    require_reviewer(&state.config.reviewer_roles, &user)?;

    let request = PageRequest::try_from(query)?;
    let page = state
        .loan_service
        .get_pending_loans(&request, &user.token)
        .await?;

    Ok(Json(ApiResponse::success(
        StatusCode::OK,
        "Loans retrieved successfully",
        page,
    )))
}

/// PUT /api/v1/loans/:id/status
///
/// Move a loan to another status and notify the applicant. Reviewers only.
pub async fn update_loan_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<LoanResponse>>, AppError> {
    require_reviewer(&state.config.reviewer_roles, &user)?;

    let status = req.status.trim();
    if status.is_empty() {
        return Err(AppError::BadRequest("Status cannot be empty".to_string()));
    }

    let loan = state
        .loan_service
        .update_loan_status(&LoanId(id), status, &user.token)
        .await?;

    Ok(Json(ApiResponse::success(
        StatusCode::OK,
        "Loan status updated successfully",
        loan.into(),
    )))
}
