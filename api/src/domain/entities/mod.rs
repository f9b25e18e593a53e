//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod loan;
pub mod loan_status;
pub mod loan_type;
pub mod page;

pub use loan::{Loan, LoanApplication, LoanId, NewLoan, DEFAULT_LOAN_STATUS_ID, DEFAULT_LOAN_TYPE_ID};
pub use loan_status::LoanStatus;
pub use loan_type::LoanType;
pub use page::{LoanPageView, LoanSortField, Page, PageRequest, PendingLoan};
