//! Core types and business rules for dual kindergarten placements.

pub mod change_request;
pub mod config;
pub mod custody;
pub mod error;
pub mod placement;
pub mod resolver;
pub mod schedule;
pub mod validator;

pub use change_request::{
    ChangeRequestInput, RequestStatus, RequestType, ScheduleChangeRequest, create_change_request,
};
pub use config::Policy;
pub use custody::{compute_custody_percentage, custody_split};
pub use error::{ConfigError, ParseError, ValidationError};
pub use placement::{
    DualPlacement, PlacementInput, PlacementSlot, PlacementStatus, create_dual_placement,
};
pub use resolver::{SchedulePair, Side, resolve_conflict};
pub use schedule::{Weekday, WeeklySchedule};
pub use validator::{SplitReport, is_valid_split, split_report};
