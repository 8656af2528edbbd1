use std::sync::Arc;

use clap::{Parser, ValueEnum};
use serde_json::Value;
use tracing::Level;

use context_components::reducers::{merge_reducer, replace_reducer, sum_reducer};
use context_components::{
    make_context_components, to_markup, Props, Reducer, Registry, RenderContext, RenderOptions,
    Rendered, TreeSpec,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReducerKind {
    Merge,
    Sum,
    Replace,
}

/// Render a declarative JSON tree through a pair of context components.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Tree document (JSON string)
    tree: String,
    /// Initial context (JSON); non-JSON input is taken as a string
    #[arg(long, default_value = "{}")]
    initial: String,
    /// Context slot name
    #[arg(long)]
    key: Option<String>,
    /// How props are folded into the context
    #[arg(long, value_enum, default_value_t = ReducerKind::Merge)]
    reducer: ReducerKind,
    /// Prop read by the `sum` reducer
    #[arg(long, default_value = "delta")]
    field: String,
    /// Print markup instead of JSON
    #[arg(long, conflicts_with = "text")]
    markup: bool,
    /// Print only the rendered text
    #[arg(long)]
    text: bool,
    #[arg(long, default_value_t = RenderOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let spec = match TreeSpec::from_json(&args.tree) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid tree: {e}");
            std::process::exit(1);
        }
    };
    let initial = serde_json::from_str::<Value>(&args.initial)
        .unwrap_or_else(|_| Value::String(args.initial.clone()));

    let reducer: Reducer = match args.reducer {
        ReducerKind::Merge => Arc::new(merge_reducer()),
        ReducerKind::Sum => Arc::new(sum_reducer(args.field.clone())),
        ReducerKind::Replace => Arc::new(replace_reducer()),
    };
    let components = make_context_components(
        move |ctx: &Value, props: &Props| reducer(ctx, props),
        initial,
        args.key.as_deref(),
    );

    let result = spec
        .build(&components, &Registry::with_builtins())
        .and_then(|node| {
            let options = RenderOptions::default().with_max_depth(args.max_depth);
            RenderContext::new(options).render(&node)
        });
    let out = match result {
        Ok(out) => out,
        Err(e) => {
            eprintln!("Render failed: {e}");
            std::process::exit(1);
        }
    };

    if args.markup {
        println!("{}", to_markup(&out));
    } else if args.text {
        println!("{}", out.iter().map(Rendered::text_content).collect::<String>());
    } else {
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Cannot serialize output: {e}");
                std::process::exit(1);
            }
        }
    }
}
