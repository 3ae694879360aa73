use anyhow::Context;
use serde_json::{Value, json};
use warden_cache::NormalizedCache;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ShowArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `warden show`.
pub fn run(args: &ShowArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let value = ctx.cache.read(|store| render_view(store.view().as_ref(), args.field.as_deref()))??;
    output(&value, flags.format)
}

fn render_view(view: &NormalizedCache, field: Option<&str>) -> anyhow::Result<Value> {
    let Some(field) = field else {
        return Ok(serde_json::to_value(view.snapshot())?);
    };
    let value = view
        .field(field)
        .with_context(|| format!("no root field named '{field}'"))?;
    let entities: Vec<_> = value.refs().iter().filter_map(|r| view.get(r)).collect();
    Ok(json!({ "field": field, "entities": entities }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::load_cache;

    #[test]
    fn field_view_resolves_entities_in_order() {
        let cache = load_cache(None).unwrap();
        let value = render_view(&cache, Some("listDataModels")).unwrap();
        let ids: Vec<&str> = value["entities"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["id"].as_str())
            .collect();
        assert_eq!(ids, ["Okta.Standard", "GSuite.Standard"]);
    }

    #[test]
    fn unknown_field_is_an_error() {
        let cache = load_cache(None).unwrap();
        assert!(render_view(&cache, Some("nope")).is_err());
    }
}
