use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use water_intake::config::toml_config::TomlConfig;
use water_intake::config::Overrides;
use water_intake::core::locale;
use water_intake::core::report::{self, OutputFormat, TextOptions};
use water_intake::core::session::{Notification, NotificationKind};
use water_intake::core::wizard::{self, Step, WizardState, COMMANDS};
use water_intake::domain::ports::{SettingsProvider, ShareSink};
use water_intake::utils::error::ErrorSeverity;
use water_intake::utils::logger;
use water_intake::{
    meter_percentage, ClipboardFile, CliConfig, Command, IntakeEngine, IntakeError,
    LocalStorage, Locale, Result, Settings, StdoutShare,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // settings file first, flags on top
    let file = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let settings = match Settings::resolve(file.as_ref(), &Overrides::from(&cli)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }
    tracing::debug!("Effective settings: {:?}", settings);

    if let Err(e) = run(cli.command, &settings).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        report_error(&e, settings.locale());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn report_error(e: &IntakeError, locale: Locale) {
    match e {
        IntakeError::InputError(errors) => {
            for error in errors.errors() {
                eprintln!("❌ {}", locale::validation_message(locale, *error));
            }
        }
        other => {
            eprintln!("❌ {}", other.user_friendly_message());
            eprintln!("💡 {}", other.recovery_suggestion());
        }
    }
}

fn print_notification(notification: &Notification) {
    let icon = match notification.kind {
        NotificationKind::Success => "✅",
        NotificationKind::Error => "❌",
        NotificationKind::Info => "ℹ️",
    };
    println!("{} {}", icon, notification.message);
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let storage = LocalStorage::new(settings.data_dir().to_string());
    let engine = IntakeEngine::new(storage, settings.locale());

    match command {
        Command::Calculate {
            weight,
            activity,
            format,
            arabic_digits,
            save,
        } => {
            let format: OutputFormat =
                format
                    .parse()
                    .map_err(|reason| IntakeError::InvalidConfigValueError {
                        field: "--format".to_string(),
                        value: format.clone(),
                        reason,
                    })?;

            // compute, then store, then render
            let result = engine.compute(weight.as_deref(), activity.as_deref())?;
            if save {
                let notification = engine.save_last(Some(&result)).await?;
                tracing::info!("{}", notification.message);
            }
            let options = TextOptions {
                arabic_digits,
                ..Default::default()
            };
            println!("{}", report::render(&result, format, settings.locale(), options)?);
        }
        Command::Meter { weight } => {
            let weight = weight.unwrap_or_else(|| settings.default_weight());
            println!("{}", report::meter_bar(meter_percentage(weight), 0));
        }
        Command::Share {
            weight,
            activity,
            clipboard,
            url,
        } => {
            let page_url = settings.share_url(url.as_deref())?;
            let result = if weight.is_none() && activity.is_none() {
                None
            } else {
                Some(engine.compute(weight.as_deref(), activity.as_deref())?)
            };

            let stdout = StdoutShare;
            let notification = match clipboard {
                Some(path) => {
                    let clipboard = ClipboardFile::new(path);
                    engine
                        .share(result.as_ref(), None, &clipboard, &page_url)
                        .await
                }
                None => {
                    engine
                        .share(
                            result.as_ref(),
                            Some(&stdout as &dyn ShareSink),
                            &stdout,
                            &page_url,
                        )
                        .await
                }
            };
            print_notification(&notification);
        }
        Command::History { clear } => {
            let s = locale::strings(settings.locale());
            if clear {
                engine.clear_history().await?;
                println!("✅ {}", s.history_cleared);
            } else {
                let saved = engine.history().await?;
                if saved.is_empty() {
                    println!("{}", s.no_saved_results);
                } else {
                    println!("{}", report::render_history(&saved, settings.locale()));
                }
            }
        }
        Command::Export { output } => {
            let count = engine.export_history(&output).await?;
            println!(
                "📁 {}",
                locale::exported_sentence(settings.locale(), count, &output)
            );
        }
        Command::Theme { toggle } => {
            let theme = if toggle {
                engine.toggle_theme().await?
            } else {
                engine.theme().await?
            };
            println!("{}", theme.as_str());
        }
        Command::Wizard => run_wizard(&engine, settings).await?,
    }

    Ok(())
}

fn print_wizard_help() {
    println!("Commands:");
    for spec in COMMANDS {
        println!("  {}", spec.usage);
    }
    println!("  meter            hydration preview for the typed weight");
    println!("  save             save the current result");
    println!("  share            share the current result");
    println!("  theme            toggle light/dark theme");
    println!("  help             show this list");
    println!("  quit             leave the wizard");
}

async fn run_wizard(engine: &IntakeEngine<LocalStorage>, settings: &Settings) -> Result<()> {
    let locale = settings.locale();
    let stdout = StdoutShare;
    let mut state = WizardState::new(locale);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_wizard_help();
    loop {
        print!("[{}/3] > ", state.step.number());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_whitespace().next().unwrap_or_default() {
            "quit" | "exit" => break,
            "help" => print_wizard_help(),
            "meter" => println!("{}", report::meter_bar(state.meter_preview(), 0)),
            "save" => {
                let notification = engine.save_last(state.last_result.as_ref()).await?;
                print_notification(&notification);
            }
            "share" => {
                let notification = engine
                    .share(
                        state.last_result.as_ref(),
                        Some(&stdout as &dyn ShareSink),
                        &stdout,
                        settings.page_url(),
                    )
                    .await;
                print_notification(&notification);
            }
            "theme" => println!("{}", engine.toggle_theme().await?.as_str()),
            _ => {
                let previous = state.step;
                state = match wizard::dispatch_line(state.clone(), line) {
                    Ok(next) => next,
                    Err(e) => {
                        eprintln!("❌ {} ({})", e.user_friendly_message(), e.recovery_suggestion());
                        continue;
                    }
                };

                for error in &state.errors {
                    eprintln!("❌ {}", locale::validation_message(locale, *error));
                }
                if previous != Step::Result && state.step == Step::Result {
                    if let Some(result) = &state.last_result {
                        println!("{}", report::render_text(result, locale, TextOptions::default()));
                    }
                }
            }
        }
    }

    Ok(())
}
