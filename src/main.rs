// SPDX-License-Identifier: MPL-2.0
use monav_l10n::args::fill;
use monav_l10n::catalog::TranslationValue;
use monav_l10n::config::Config;
use monav_l10n::i18n::I18n;
use monav_l10n::plural::PluralRule;
use monav_l10n::{catalog, config, logging, paths};
use std::error::Error;
use std::fmt::Display;
use std::io::{self, Write};
use std::process::ExitCode;

const HELP: &str = "\
monav-l10n: inspect and query MoNav translation catalogs

USAGE:
  monav_l10n [OPTIONS] <COMMAND> [ARGS]

COMMANDS:
  lookup <context> <source>   Print the display text for a UI string
  stats <file.ts>             Count translated and untranslated messages
  check <file.ts>             Validate a catalog (exit code 1 when malformed)
  normalize <in.ts> [out.ts]  Rewrite a catalog in canonical layout
  locales                     List locales with a catalog

LOOKUP OPTIONS:
  --comment <text>            Disambiguation comment
  -n, --count <N>             Plural count for %n messages
  --arg <value>               Value for %1, %2, ... (repeatable)

OPTIONS:
  --lang <locale>             UI locale, e.g. de_DE
  --catalog-dir <dir>         Directory with .ts catalogs
  --config-dir <dir>          Directory with settings.toml
  --log-level <level>         off, error, warn, info, debug, trace
  -h, --help                  Print this help
";

const SUCCESS: u8 = 0;
const FAILURE: u8 = 1;

type CliResult<T> = Result<T, Box<dyn Error>>;

struct Flags {
    catalog_dir: Option<String>,
    config_dir: Option<String>,
    lang: Option<String>,
    log_level: Option<String>,
    comment: Option<String>,
    count: Option<i64>,
    values: Vec<String>,
    free: Vec<String>,
}

impl Flags {
    fn from_args(mut args: pico_args::Arguments) -> CliResult<Self> {
        Ok(Self {
            catalog_dir: args.opt_value_from_str("--catalog-dir")?,
            config_dir: args.opt_value_from_str("--config-dir")?,
            lang: args.opt_value_from_str("--lang")?,
            log_level: args.opt_value_from_str("--log-level")?,
            comment: args.opt_value_from_str("--comment")?,
            count: args.opt_value_from_str(["-n", "--count"])?,
            values: args.values_from_str("--arg")?,
            free: args
                .finish()
                .into_iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
        })
    }

    /// `--log-level` when given, the configured level otherwise.
    fn log_level(&self, config: &Config) -> CliResult<log::LevelFilter> {
        match self.log_level.as_deref() {
            Some(level) => Ok(level.parse::<log::LevelFilter>()?),
            None => Ok(config.log_level()),
        }
    }
}

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: pico_args::Arguments) -> CliResult<u8> {
    let flags = Flags::from_args(args)?;
    paths::init_cli_overrides(flags.catalog_dir.clone(), flags.config_dir.clone());

    let config = config::load().unwrap_or_default();
    logging::init(flags.log_level(&config)?);

    execute(&flags, &config, &mut io::stdout().lock())
}

/// Runs the command named by the free arguments, printing to `out`.
fn execute(flags: &Flags, config: &Config, out: &mut dyn Write) -> CliResult<u8> {
    let Some((command, rest)) = flags.free.split_first() else {
        write!(out, "{HELP}")?;
        return Ok(FAILURE);
    };

    match (command.as_str(), rest) {
        ("lookup", [context, source]) => {
            let i18n = I18n::new(flags.lang.clone(), config);
            let text = match (flags.count, &flags.comment) {
                (Some(n), _) => i18n.tr_plural(context, source, n),
                (None, Some(comment)) => i18n
                    .translator()
                    .lookup_disambiguated(context, source, comment)
                    .to_string(),
                (None, None) => i18n.tr(context, source).to_string(),
            };
            let values: Vec<&dyn Display> =
                flags.values.iter().map(|value| value as &dyn Display).collect();
            writeln!(out, "{}", fill(&text, &values))?;
            Ok(SUCCESS)
        }
        ("stats", [file]) => {
            let catalog = catalog::parse_file(file)?;
            writeln!(out, "{}", catalog.stats())?;
            Ok(SUCCESS)
        }
        ("check", [file]) => match catalog::parse_file(file) {
            Ok(catalog) => {
                writeln!(out, "{file}: ok, {}", catalog.stats())?;
                let rule = PluralRule::for_language(catalog.language.as_deref().unwrap_or_default());
                for (context, message) in catalog.messages() {
                    if let TranslationValue::Plural(forms) = &message.translation.value {
                        if !forms.is_empty() && forms.len() != rule.form_count() {
                            writeln!(
                                out,
                                "{file}: {context}/{}: {} numerus forms, {:?} expects {}",
                                message.source,
                                forms.len(),
                                rule,
                                rule.form_count()
                            )?;
                        }
                    }
                }
                Ok(SUCCESS)
            }
            Err(err) => {
                writeln!(out, "{file}: {err}")?;
                Ok(FAILURE)
            }
        },
        ("normalize", [input, rest @ ..]) if rest.len() <= 1 => {
            let catalog = catalog::parse_file(input)?;
            match rest.first() {
                Some(output) => catalog::write_file(&catalog, output)?,
                None => write!(out, "{}", catalog::to_string(&catalog))?,
            }
            Ok(SUCCESS)
        }
        ("locales", []) => {
            let i18n = I18n::new(flags.lang.clone(), config);
            match i18n.catalog_dir() {
                Some(dir) => writeln!(out, "catalog dir: {}", dir.display())?,
                None => writeln!(out, "catalog dir: (bundled only)")?,
            }
            for locale in &i18n.available_locales {
                let marker = if locale == i18n.current_locale() { '*' } else { ' ' };
                writeln!(out, "{marker} {locale}")?;
            }
            let rule = i18n.translator().plural_rule();
            writeln!(
                out,
                "plural rule: {:?} ({} numerus forms)",
                rule,
                rule.form_count()
            )?;
            Ok(SUCCESS)
        }
        _ => {
            eprintln!("unknown command or wrong arguments: {}", flags.free.join(" "));
            write!(out, "{HELP}")?;
            Ok(FAILURE)
        }
    }
}
