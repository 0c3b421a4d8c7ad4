use crate::args::{CheckArgs, Cli, Command, StampArgs, TranslateArgs};
use anyhow::Context;
use planfile_core::{header, localize, CatalogTranslator};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const VALIDATION_FAILED: i32 = 1;
    pub const USAGE_ERROR: i32 = 2;
}

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Check(args) => check(args),
        Command::Stamp(args) => stamp(args),
        Command::Translate(args) => translate(args),
    }
}

fn load_object(path: &Path) -> Result<Map<String, Value>, planfile_core::DocumentError> {
    match planfile_core::parse_file(path)? {
        Value::Object(object) => Ok(object),
        _ => Err(planfile_core::DocumentError::RootNotObject),
    }
}

fn check(args: CheckArgs) -> anyhow::Result<i32> {
    let object = match load_object(&args.file) {
        Ok(object) => object,
        Err(err) => {
            eprintln!("{}: {err}", args.file.display());
            return Ok(exit_codes::VALIDATION_FAILED);
        }
    };

    let result = if args.external {
        header::validate_external(&object, &args.file_type, args.min_version, args.max_version)
    } else {
        header::validate_internal(&object, &args.file_type, args.min_version, args.max_version)
    };

    match result {
        Ok(version) => {
            println!("{}: ok ({} v{version})", args.file.display(), args.file_type);
            Ok(exit_codes::OK)
        }
        Err(err) => {
            eprintln!("{}: {err}", args.file.display());
            Ok(exit_codes::VALIDATION_FAILED)
        }
    }
}

fn stamp(args: StampArgs) -> anyhow::Result<i32> {
    let object = match load_object(&args.file) {
        Ok(object) => object,
        Err(err) => {
            eprintln!("{}: {err}", args.file.display());
            return Ok(exit_codes::VALIDATION_FAILED);
        }
    };

    let target = args.output.as_deref().unwrap_or(&args.file);
    planfile_core::save_stamped(target, object, &args.file_type, args.set_version)
        .with_context(|| format!("writing {}", target.display()))?;
    info!(file = %target.display(), file_type = %args.file_type, version = args.set_version, "stamped");
    println!("{}: stamped {} v{}", target.display(), args.file_type, args.set_version);
    Ok(exit_codes::OK)
}

fn translate(args: TranslateArgs) -> anyhow::Result<i32> {
    let mut object = match load_object(&args.file) {
        Ok(object) => object,
        Err(err) => {
            eprintln!("{}: {err}", args.file.display());
            return Ok(exit_codes::VALIDATION_FAILED);
        }
    };

    let catalog = CatalogTranslator::from_path(&args.catalog)
        .with_context(|| format!("loading catalog {}", args.catalog.display()))?;

    let context = match args.context {
        Some(context) => context,
        None => args
            .file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let spec = localize::inject_default_keys(&mut object);
    let object = localize::translate_map(object, &context, &spec, &catalog);

    let mut rendered = serde_json::to_string_pretty(&object)?;
    rendered.push('\n');
    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered).with_context(|| format!("writing {}", path.display()))?;
            println!("{}: translated", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(exit_codes::OK)
}
