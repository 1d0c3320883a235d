//! Integrity and validation services
//!
//! Each service owns the transaction for its mutating operations: the
//! existence, uniqueness and dependents checks run in the same transaction
//! as the write they guard.
//!
//! | Service | Entity |
//! |---------|--------|
//! | [`DepartmentService`] | 部门 |
//! | [`JobService`] | 职位 |
//! | [`EmployeeService`] | 员工 |

pub mod department;
pub mod employee;
pub mod error;
pub mod job;

pub use department::DepartmentService;
pub use employee::EmployeeService;
pub use error::{ServiceError, ServiceResult};
pub use job::JobService;
