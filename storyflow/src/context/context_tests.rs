//! Comprehensive tests for context module.

#[cfg(test)]
mod tests {
    use crate::context::{Context, Origin};
    use indexmap::IndexMap;
    use serde_json::json;

    fn updates(pairs: &[(&str, serde_json::Value)]) -> IndexMap<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_context_never_overwrites() {
        let mut ctx = Context::seed([("a", json!(1))]).unwrap();
        let origin = Origin::step("ExistedKey", "one");

        assert!(ctx.extend(updates(&[("a", json!(2))]), &origin).is_err());
        assert!(ctx.insert("a", json!(3), origin).is_err());
        assert_eq!(ctx["a"], json!(1));
        assert_eq!(ctx.origin("a"), Some(&Origin::Argument));
    }

    #[test]
    fn test_context_empty_extend() {
        let mut ctx = Context::new();
        ctx.extend(IndexMap::new(), &Origin::step("T", "s")).unwrap();
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_context_keys_listing() {
        let ctx = Context::seed([("a", json!(2)), ("b", json!(2))]).unwrap();
        assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_context_to_dict_keeps_order() {
        let mut ctx = Context::seed([("d", json!(3))]).unwrap();
        ctx.extend(
            updates(&[("a", json!(2)), ("b", json!(4))]),
            &Origin::step("SimpleSubstory", "before"),
        )
        .unwrap();

        let dict = ctx.to_dict();
        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["d", "a", "b"]);
        assert_eq!(ctx.to_json(), json!({"a": 2, "b": 4, "d": 3}));
    }

    #[test]
    fn test_context_iter_reports_origins() {
        let mut ctx = Context::seed([("e", json!(4))]).unwrap();
        ctx.insert("aaaa", json!(0), Origin::step("SubstoryDICtxRepr", "before"))
            .unwrap();

        let origins: Vec<String> = ctx.iter().map(|(_, e)| e.origin.to_string()).collect();
        assert_eq!(
            origins,
            vec!["Story argument", "Set by SubstoryDICtxRepr.before"]
        );
    }

    #[test]
    fn test_context_clone_is_independent() {
        let ctx = Context::seed([("a", json!(1))]).unwrap();
        let mut copy = ctx.clone();
        copy.insert("b", json!(2), Origin::step("T", "s")).unwrap();

        assert_eq!(ctx.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_context_serializes_with_provenance() {
        let ctx = Context::seed([("a", json!(1))]).unwrap();
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json, json!({"a": {"value": 1, "origin": {"kind": "argument"}}}));
    }

    #[test]
    #[should_panic]
    fn test_context_index_missing_panics() {
        let ctx = Context::new();
        let _ = &ctx["missing"];
    }
}
