use std::io;

use clap::Args;
use jam3a_app::domain::content::lookup;

use crate::cli::{Shell, chain, output_failed, render};

#[derive(Debug, Args)]
pub(crate) struct ContentArgs {
    /// Print only this block
    key: Option<String>,
}

pub(crate) async fn run(
    args: ContentArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let fetched = shell
        .app
        .content
        .list_content()
        .await
        .map_err(|error| format!("failed to load content: {}", chain(&error)))?;

    if fetched.is_cached() {
        render::write_banner(out, shell.language).map_err(output_failed)?;
    }

    let Some(key) = args.key else {
        return render::write_content(out, &fetched.value, shell.language).map_err(output_failed);
    };

    let text = lookup(&fetched.value, &key, shell.language)
        .ok_or_else(|| format!("no content block named {key}"))?;

    writeln!(out, "{text}").map_err(output_failed)
}
