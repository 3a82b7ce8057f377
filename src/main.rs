use chore_app::api::ProofFile;
use chore_app::handlers::{Input, NoticeLevel, Outcome};
use chore_app::router::{NavOutcome, RouteParams};
use chore_app::shell::Command;
use chore_app::{ApiClient, App, AppError, ClientConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    info!(api = %config.base_url, "starting");
    let app = App::new(ApiClient::new(&config)?);

    if let Err(err) = app.bootstrap().await {
        println!("{}", app.screen().await);
        return Err(err.into());
    }
    println!("{}", app.screen().await);
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{}", err.render());
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(err) = run(&app, command).await {
            println!("Error: {err}");
        }
    }

    info!("bye");
    Ok(())
}

async fn run(app: &App, command: Command) -> Result<(), AppError> {
    let outcome = match command {
        Command::Show | Command::Quit => {
            println!("{}", app.screen().await);
            return Ok(());
        }
        Command::Go { route, child_id } => {
            let params = RouteParams { child_id };
            Outcome::Navigated(app.navigate_named(&route, params).await)
        }
        Command::Click { slot, proof } => {
            let input = match proof {
                Some(path) => Some(Input::Proof(ProofFile::from_path(&path).await?)),
                None => None,
            };
            app.click(slot, input).await
        }
        Command::Extra {
            slot,
            points,
            title,
        } => {
            let title = title.join(" ");
            app.click(slot, Some(Input::Extra { title, points })).await
        }
        Command::Text { slot, text } => app.click(slot, Some(Input::Text(text.join(" ")))).await,
        Command::Confirm { slot } => app.click(slot, Some(Input::Confirm)).await,
    };

    report(&outcome);
    println!("{}", app.screen().await);
    Ok(())
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Updated { notice: Some(notice) } | Outcome::Notice(notice) | Outcome::Failed(notice) => {
            let marker = match notice.level {
                NoticeLevel::Info => "ℹ",
                NoticeLevel::Warning => "⚠",
                NoticeLevel::Error => "✖",
            };
            println!("{marker} {}", notice.text);
        }
        Outcome::NeedsInput { prompt } => println!("? {prompt}"),
        Outcome::Ignored => println!("nothing to press there"),
        Outcome::Discarded => warn!("the page changed before the answer arrived"),
        Outcome::Navigated(NavOutcome::Failed(message)) => warn!("page failed to load: {message}"),
        Outcome::Updated { notice: None } | Outcome::Navigated(_) => {}
    }
}
