//! Application services for the decision log.

mod decision_log;
mod radar;

pub use decision_log::{
    DecisionLogError, DecisionLogResult, DecisionLogService, RecordDecisionRequest,
};
pub use radar::{DecisionFilter, DecisionRadarItem, rank_decisions};
