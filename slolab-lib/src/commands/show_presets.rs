use super::Host;
use crate::Result;
use crate::presets::{self, Preset};
use crate::sli::SliSpec;
use clap::Parser;
use ohno::app_err;
use std::io::Write;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
pub struct PresetsArgs {
    /// Only show this preset
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

pub fn show_presets<H: Host>(host: &mut H, args: &PresetsArgs) -> Result<()> {
    let selected: Vec<Preset> = match &args.name {
        Some(name) => vec![presets::by_name(name).ok_or_else(|| {
            app_err!(
                "unknown preset '{name}', expected one of: {}",
                presets::names().collect::<Vec<_>>().join(", ")
            )
        })?],
        None => Preset::iter().collect(),
    };

    let mut out = host.output();
    for (index, preset) in selected.into_iter().enumerate() {
        if index > 0 {
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "{preset}");
        for spec in preset.specs() {
            let _ = writeln!(out, "  {}", describe(&spec));
        }
    }

    Ok(())
}

fn describe(spec: &SliSpec) -> String {
    let inputs: Vec<&str> = spec.inputs.iter().map(|i| i.display_name()).collect();
    let line = format!("{} [{}] {}", spec.id, spec.compute.mode, inputs.join(" + "));

    match &spec.judge {
        Some(judge) if !judge.rules.is_empty() => {
            let rules: Vec<String> = judge.rules.iter().map(|r| format!("{} if {r}", r.level)).collect();
            format!("{line} ({})", rules.join(", "))
        }
        _ => line,
    }
}
