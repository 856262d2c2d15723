//! jq pre-filter for resolver dumps that do not already have document shape.
use anyhow::{anyhow, Context, Result};
use jaq_core::{load, Compiler, Ctx, Filter, Native, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// A jq program compiled once and applied to every input file.
pub struct JqFilter {
    filter: Filter<Native<Val>>,
}

impl JqFilter {
    pub fn compile(filter_src: &str) -> Result<Self> {
        let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
        let arena = load::Arena::default();
        let program = load::File { code: filter_src, path: () };

        let modules = loader.load(&arena, program).map_err(|errs| {
            report(errs.into_iter().map(|(_, err)| format!("parse error: {err:?}")), filter_src)
        })?;
        let filter = Compiler::default()
            .with_funs(jaq_std::funs().chain(jaq_json::funs()))
            .compile(modules)
            .map_err(|errs| {
                let undefined = errs
                    .into_iter()
                    .flat_map(|(_, list)| list)
                    .map(|(name, undef)| format!("undefined `{name}`: {undef:?}"));
                report(undefined, filter_src)
            })?;
        Ok(Self { filter })
    }

    /// Every output value of the program is one document.
    pub fn documents(&self, input: &Value) -> Result<Vec<Value>> {
        let inputs = RcIter::new(core::iter::empty());
        let outputs = self.filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

        let mut documents = Vec::new();
        for output in outputs {
            let output = output.map_err(|e| anyhow!("jq runtime error: {e:?}"))?;
            let text = output.to_string();
            let value = serde_json::from_str::<Value>(&text)
                .with_context(|| format!("jq produced a value that is not JSON: {text}"))?;
            documents.push(value);
        }
        Ok(documents)
    }
}

fn report(lines: impl Iterator<Item = String>, filter_src: &str) -> anyhow::Error {
    let lines = lines.collect::<Vec<_>>();
    anyhow!("invalid jq expression `{filter_src}`:\n{}", lines.join("\n"))
}
