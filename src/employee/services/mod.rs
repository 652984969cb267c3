//! Application services for employees.

mod staffing;

pub use staffing::{
    Assignment, HireEmployeeRequest, StaffingError, StaffingResult, StaffingService,
};
