use super::compiler::FilterCompiler;
use model::{
    filter::{
        Filter,
        expr::{Comparator, Expr, Ident},
    },
    query::{Condition, ConditionValue, GroupMember, LogicalGroup, LogicalKind, Op, QueryConditions},
};
use tracing::{debug, trace, warn};

/// Compiles the condition model into a relational expression tree.
///
/// `None` is the neutral filter: the consumer omits its WHERE clause.
pub struct SqlFilterCompiler;

impl FilterCompiler for SqlFilterCompiler {
    type Filter = Option<Expr>;

    fn compile(conditions: &QueryConditions) -> Self::Filter {
        let mut exprs = Vec::with_capacity(conditions.fields().condition_count());

        for (field, field_conditions) in conditions.fields().iter() {
            let column = Ident::column(field);
            exprs.extend(
                field_conditions
                    .iter()
                    .filter_map(|cond| compile_condition(&column, cond)),
            );
        }
        let predicates = exprs.len();

        exprs.extend(conditions.groups().iter().filter_map(compile_group));

        debug!(
            "Compiled relational filter: {} field predicates, {} groups",
            predicates,
            exprs.len() - predicates
        );

        collapse(exprs)
    }
}

/// Zero predicates is no filter, one stands alone, more are conjoined.
fn collapse(mut exprs: Vec<Expr>) -> Option<Expr> {
    match exprs.len() {
        0 => None,
        1 => exprs.pop(),
        _ => Some(Expr::And(exprs)),
    }
}

fn compile_condition(column: &Ident, cond: &Condition) -> Option<Expr> {
    if !cond.is_well_formed() {
        warn!(
            "Dropping `{}` condition on `{column}`: unsupported value {:?}",
            cond.op(),
            cond.value()
        );
        return None;
    }

    let expr = match cond.value() {
        ConditionValue::Scalar(value) => Expr::Compare {
            column: column.clone(),
            op: comparator(cond.op())?,
            value: value.clone(),
        },
        ConditionValue::Sequence(values) => {
            let membership = Expr::In {
                column: column.clone(),
                values: values.clone(),
            };
            match cond.op() {
                Op::Nin => Expr::not(membership),
                _ => membership,
            }
        }
        ConditionValue::Pattern(pattern) => Expr::Like {
            column: column.clone(),
            pattern: pattern.clone(),
        },
    };

    Some(expr)
}

fn comparator(op: Op) -> Option<Comparator> {
    match op {
        Op::Eq => Some(Comparator::Eq),
        Op::Ne => Some(Comparator::NotEq),
        Op::Gt => Some(Comparator::Gt),
        Op::Gte => Some(Comparator::GtEq),
        Op::Lt => Some(Comparator::Lt),
        Op::Lte => Some(Comparator::LtEq),
        Op::In | Op::Nin | Op::Like => None,
    }
}

fn compile_group(group: &LogicalGroup) -> Option<Expr> {
    let members: Vec<Expr> = group.members.iter().filter_map(normalize_member).collect();

    if members.is_empty() {
        trace!("Dropping empty `{}` group", group.kind.as_str());
        return None;
    }

    Some(match group.kind {
        LogicalKind::And => Expr::And(members),
        LogicalKind::Or => Expr::Or(members),
    })
}

fn normalize_member(member: &GroupMember) -> Option<Expr> {
    match member {
        GroupMember::Raw(filter) => from_filter(filter.clone()),
        GroupMember::KeyValue(pairs) => collapse(
            pairs
                .iter()
                .map(|(key, value)| Expr::Compare {
                    column: Ident::column(key),
                    op: Comparator::Eq,
                    value: value.clone(),
                })
                .collect(),
        ),
        GroupMember::Nested(source) => from_filter(source.build()),
    }
}

fn from_filter(filter: Filter) -> Option<Expr> {
    match filter {
        Filter::Relational(expr) => expr,
        Filter::Document(doc) => {
            warn!(
                "Dropping document filter with {} keys from relational group",
                doc.len()
            );
            None
        }
    }
}
