pub mod condition;
pub mod conditions;

pub use condition::{Condition, ConditionValue, MatchMode, Op};
pub use conditions::{FieldConditions, GroupMember, LogicalGroup, LogicalKind, QueryConditions};
