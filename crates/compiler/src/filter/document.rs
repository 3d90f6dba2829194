use super::compiler::FilterCompiler;
use crate::pattern::CASE_INSENSITIVE;
use model::{
    filter::{Filter, document::Document},
    query::{Condition, ConditionValue, GroupMember, LogicalGroup, LogicalKind, Op, QueryConditions},
};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, trace, warn};

pub const REGEX_KEY: &str = "$regex";
pub const OPTIONS_KEY: &str = "$options";

/// Compiles the condition model into a document filter object.
///
/// The empty document is the neutral filter and matches everything.
pub struct DocumentFilterCompiler;

impl FilterCompiler for DocumentFilterCompiler {
    type Filter = Document;

    fn compile(conditions: &QueryConditions) -> Self::Filter {
        let mut result = Document::new();

        for (field, field_conditions) in conditions.fields().iter() {
            let compiled = match field_conditions {
                [single] => compile_single(field, single),
                many => compile_merged(field, many),
            };
            if let Some(value) = compiled {
                result.insert(field, value);
            }
        }
        let fields = result.len();

        for group in conditions.groups() {
            append_group(&mut result, group);
        }

        debug!(
            "Compiled document filter: {} fields, {} group keys",
            fields,
            result.len() - fields
        );

        result
    }
}

pub fn operator_key(op: Op) -> &'static str {
    match op {
        Op::Eq => "$eq",
        Op::Ne => "$ne",
        Op::Gt => "$gt",
        Op::Gte => "$gte",
        Op::Lt => "$lt",
        Op::Lte => "$lte",
        Op::In => "$in",
        Op::Nin => "$nin",
        Op::Like => REGEX_KEY,
    }
}

pub fn group_key(kind: LogicalKind) -> &'static str {
    match kind {
        LogicalKind::And => "$and",
        LogicalKind::Or => "$or",
    }
}

/// A lone equality is stored as the bare value, anything else as an
/// operator object.
fn compile_single(field: &str, cond: &Condition) -> Option<JsonValue> {
    if cond.op() == Op::Eq
        && let ConditionValue::Scalar(v) = cond.value()
    {
        return Some(v.to_json());
    }

    let mut object = Map::new();
    write_operator(&mut object, field, cond);
    (!object.is_empty()).then_some(JsonValue::Object(object))
}

/// Several conditions share one operator object; a repeated operator keeps
/// the last value written.
fn compile_merged(field: &str, conditions: &[Condition]) -> Option<JsonValue> {
    let mut object = Map::new();
    for cond in conditions {
        write_operator(&mut object, field, cond);
    }
    (!object.is_empty()).then_some(JsonValue::Object(object))
}

fn write_operator(object: &mut Map<String, JsonValue>, field: &str, cond: &Condition) {
    if !cond.is_well_formed() {
        warn!(
            "Dropping `{}` condition on `{field}`: unsupported value {:?}",
            cond.op(),
            cond.value()
        );
        return;
    }

    match cond.value() {
        ConditionValue::Pattern(pattern) => {
            object.insert(REGEX_KEY.to_string(), JsonValue::String(pattern.clone()));
            object.insert(
                OPTIONS_KEY.to_string(),
                JsonValue::String(CASE_INSENSITIVE.to_string()),
            );
        }
        ConditionValue::Sequence(values) => {
            let array = values.iter().map(|v| v.to_json()).collect();
            object.insert(operator_key(cond.op()).to_string(), JsonValue::Array(array));
        }
        ConditionValue::Scalar(v) => {
            object.insert(operator_key(cond.op()).to_string(), v.to_json());
        }
    }
}

/// Appends the group's members under its operator key, extending the list
/// left there by an earlier group of the same kind. A field already stored
/// under that key is kept and the group is dropped.
fn append_group(result: &mut Document, group: &LogicalGroup) {
    let members: Vec<JsonValue> = group.members.iter().filter_map(normalize_member).collect();
    let key = group_key(group.kind);

    if members.is_empty() {
        trace!("Dropping empty `{}` group", group.kind.as_str());
        return;
    }

    match result.get_mut(key) {
        Some(JsonValue::Array(existing)) => existing.extend(members),
        Some(other) => {
            warn!(
                "Dropping `{}` group: `{key}` already holds field value {other}",
                group.kind.as_str()
            );
        }
        None => {
            result.insert(key, JsonValue::Array(members));
        }
    }
}

fn normalize_member(member: &GroupMember) -> Option<JsonValue> {
    match member {
        GroupMember::Raw(filter) => from_filter(filter.clone()),
        GroupMember::KeyValue(pairs) => Some(JsonValue::Object(
            pairs
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )),
        GroupMember::Nested(source) => from_filter(source.build()),
    }
}

fn from_filter(filter: Filter) -> Option<JsonValue> {
    match filter {
        Filter::Document(doc) => Some(doc.to_json()),
        Filter::Relational(expr) => {
            warn!("Dropping relational filter {expr:?} from document group");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{core::value::Value, filter::expr::Expr};
    use serde_json::json;
    use tracing_test::traced_test;

    fn conditions(pairs: Vec<(&str, Condition)>) -> QueryConditions {
        let mut qc = QueryConditions::new();
        for (field, cond) in pairs {
            qc.add_condition(field, cond);
        }
        qc
    }

    fn compile(qc: &QueryConditions) -> JsonValue {
        DocumentFilterCompiler::compile(qc).to_json()
    }

    #[test]
    fn test_empty_is_empty_object() {
        let doc = DocumentFilterCompiler::compile(&QueryConditions::new());
        assert!(doc.is_empty());
        assert_eq!(doc.to_json(), json!({}));
    }

    #[test]
    fn test_single_eq_is_bare_value() {
        let qc = conditions(vec![("name", Condition::eq("test"))]);
        assert_eq!(compile(&qc), json!({"name": "test"}));

        let qc = conditions(vec![("deleted_at", Condition::eq(Value::Null))]);
        assert_eq!(compile(&qc), json!({"deleted_at": null}));
    }

    #[test]
    fn test_single_operator_object() {
        let cases = vec![
            (Condition::ne("deleted"), json!({"$ne": "deleted"})),
            (Condition::gt(18), json!({"$gt": 18})),
            (Condition::gte(60), json!({"$gte": 60})),
            (Condition::lt(100), json!({"$lt": 100})),
            (Condition::lte(10), json!({"$lte": 10})),
            (Condition::in_list(["a", "b"]), json!({"$in": ["a", "b"]})),
            (Condition::not_in(["a", "b"]), json!({"$nin": ["a", "b"]})),
            (Condition::like("^jo"), json!({"$regex": "^jo", "$options": "i"})),
        ];

        for (cond, expected) in cases {
            let qc = conditions(vec![("f", cond)]);
            assert_eq!(compile(&qc), json!({ "f": expected }));
        }
    }

    #[test]
    fn test_same_field_conditions_merge() {
        let qc = conditions(vec![("age", Condition::gt(18)), ("age", Condition::lt(30))]);
        assert_eq!(compile(&qc), json!({"age": {"$gt": 18, "$lt": 30}}));
    }

    #[test]
    fn test_repeated_eq_keeps_last() {
        let qc = conditions(vec![("s", Condition::eq("a")), ("s", Condition::eq("b"))]);
        assert_eq!(compile(&qc), json!({"s": {"$eq": "b"}}));
    }

    #[test]
    fn test_like_merges_with_other_operators() {
        let qc = conditions(vec![
            ("name", Condition::like("^jo")),
            ("name", Condition::ne("joker")),
        ]);
        assert_eq!(
            compile(&qc),
            json!({"name": {"$regex": "^jo", "$options": "i", "$ne": "joker"}})
        );
    }

    #[test]
    fn test_repeated_groups_accumulate() {
        let mut qc = QueryConditions::new();
        qc.add_logical_group(
            LogicalKind::Or,
            vec![GroupMember::key_value([("a", 1)]), GroupMember::key_value([("b", 2)])],
        );
        qc.add_logical_group(LogicalKind::Or, vec![GroupMember::key_value([("c", 3)])]);
        qc.add_logical_group(LogicalKind::And, vec![GroupMember::key_value([("d", 4)])]);

        let doc = DocumentFilterCompiler::compile(&qc);
        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc.to_json(),
            json!({
                "$or": [{"a": 1}, {"b": 2}, {"c": 3}],
                "$and": [{"d": 4}],
            })
        );
    }

    #[test]
    fn test_raw_document_member_passes_through() {
        let mut raw = Document::new();
        raw.insert("score", json!({"$gte": 90}));

        let mut qc = conditions(vec![("active", Condition::eq(true))]);
        qc.add_logical_group(LogicalKind::Or, vec![raw.into()]);

        assert_eq!(
            compile(&qc),
            json!({"active": true, "$or": [{"score": {"$gte": 90}}]})
        );
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        let mut qc = QueryConditions::new();
        qc.add_logical_group(LogicalKind::Or, vec![]);
        assert!(DocumentFilterCompiler::compile(&qc).is_empty());
    }

    #[traced_test]
    #[test]
    fn test_foreign_relational_member_is_dropped() {
        let mut qc = QueryConditions::new();
        qc.add_logical_group(
            LogicalKind::Or,
            vec![Expr::eq("a", 1).into(), GroupMember::key_value([("b", 2)])],
        );
        assert_eq!(compile(&qc), json!({"$or": [{"b": 2}]}));
        assert!(logs_contain("Dropping relational filter"));
    }

    #[traced_test]
    #[test]
    fn test_mismatched_condition_is_dropped() {
        let qc = conditions(vec![
            ("k", Condition::new(Op::Nin, ConditionValue::Scalar(Value::Int(1)))),
            ("j", Condition::eq(2)),
        ]);
        assert_eq!(compile(&qc), json!({"j": 2}));
        assert!(logs_contain("Dropping `nin` condition on `k`"));
    }

    #[traced_test]
    #[test]
    fn test_group_does_not_replace_field_with_same_key() {
        let mut qc = conditions(vec![("$or", Condition::eq(1))]);
        qc.add_logical_group(LogicalKind::Or, vec![GroupMember::key_value([("a", 1)])]);
        qc.add_logical_group(LogicalKind::And, vec![GroupMember::key_value([("b", 2)])]);

        assert_eq!(compile(&qc), json!({"$or": 1, "$and": [{"b": 2}]}));
        assert!(logs_contain("Dropping `or` group"));
    }
}
