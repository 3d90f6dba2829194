use crate::render::{Render, Renderer};
use model::filter::expr::{Expr, Ident};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Compare { column, op, value } => {
                r.sql.push('(');
                column.render(r);
                r.sql.push(' ');
                r.sql.push_str(op.symbol());
                r.sql.push(' ');
                r.add_param(value.clone());
                r.sql.push(')');
            }
            Expr::In { column, values } => {
                if values.is_empty() {
                    // Nothing is a member of the empty set.
                    r.sql.push_str("(1 = 0)");
                    return;
                }
                r.sql.push('(');
                column.render(r);
                r.sql.push_str(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        r.sql.push_str(", ");
                    }
                    r.add_param(value.clone());
                }
                r.sql.push_str("))");
            }
            Expr::Like { column, pattern } => {
                r.sql.push('(');
                column.render(r);
                r.sql.push_str(" LIKE ");
                r.add_param(pattern.as_str().into());
                r.sql.push(')');
            }
            Expr::Not(inner) => {
                r.sql.push_str("NOT ");
                inner.render(r);
            }
            Expr::And(children) => render_junction(r, children, " AND ", "(1 = 1)"),
            Expr::Or(children) => render_junction(r, children, " OR ", "(1 = 0)"),
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
    }
}

fn render_junction(r: &mut Renderer, children: &[Expr], separator: &str, empty: &str) {
    if children.is_empty() {
        r.sql.push_str(empty);
        return;
    }

    r.sql.push('(');
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            r.sql.push_str(separator);
        }
        child.render(r);
    }
    r.sql.push(')');
}

#[cfg(test)]
mod tests {
    use crate::render::{
        dialect::{MySql, Postgres},
        render_condition, render_where,
    };
    use model::{
        core::value::Value,
        filter::expr::{Comparator, Expr},
    };

    #[test]
    fn test_render_compare() {
        let (sql, params) = render_condition(&Expr::compare("age", Comparator::GtEq, 18), &Postgres);
        assert_eq!(sql, r#"("age" >= $1)"#);
        assert_eq!(params, vec![Value::Int(18)]);
    }

    #[test]
    fn test_render_not_in_mysql() {
        let expr = Expr::not(Expr::in_list("k", vec![Value::from("a"), Value::from("b")]));
        let (sql, params) = render_condition(&expr, &MySql);
        assert_eq!(sql, "NOT (`k` IN (?, ?))");
        assert_eq!(params, vec![Value::from("a"), Value::from("b")]);
    }

    #[test]
    fn test_render_nested_junctions() {
        let expr = Expr::and(vec![
            Expr::eq("status", "active"),
            Expr::or(vec![Expr::like("name", "%jo%"), Expr::eq("vip", true)]),
        ]);
        let (sql, params) = render_condition(&expr, &Postgres);
        assert_eq!(
            sql,
            r#"(("status" = $1) AND (("name" LIKE $2) OR ("vip" = $3)))"#
        );
        assert_eq!(
            params,
            vec![Value::from("active"), Value::from("%jo%"), Value::Boolean(true)]
        );
    }

    #[test]
    fn test_render_empty_sets() {
        let (sql, params) = render_condition(&Expr::in_list("k", vec![]), &Postgres);
        assert_eq!(sql, "(1 = 0)");
        assert!(params.is_empty());

        assert_eq!(render_condition(&Expr::and(vec![]), &Postgres).0, "(1 = 1)");
        assert_eq!(render_condition(&Expr::or(vec![]), &Postgres).0, "(1 = 0)");
    }

    #[test]
    fn test_render_where_neutral_filter() {
        assert_eq!(render_where(None, &Postgres), (String::new(), vec![]));

        let expr = Expr::eq("id", 7);
        let (sql, _) = render_where(Some(&expr), &Postgres);
        assert_eq!(sql, r#"WHERE ("id" = $1)"#);
    }

    #[test]
    fn test_quote_identifier_escapes_quotes() {
        let (sql, _) = render_condition(&Expr::eq(r#"we"ird"#, 1), &Postgres);
        assert_eq!(sql, r#"("we""ird" = $1)"#);
    }
}
