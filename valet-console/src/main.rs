//! valet-console binary

use std::io::{self, Write};

use clap::Parser;
use shared::ValetEvent;
use shared::util::{format_clock, format_date};
use valet_client::{SessionStore, ValetApi};
use valet_console::logger::init_logger;
use valet_console::{
    Cli, Command, ConsoleConfig, ConsoleError, ConsoleResult, EventArgs, EventForm,
    EventListController, FormField, SignInController, SubmitOutcome, messages,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = ConsoleConfig::from_cli(&cli);
    init_logger(config.log_level.as_deref(), config.log_dir.as_deref())?;

    let store = SessionStore::new(&config.session_dir);
    let client = config.client_config(store.token()).build_client()?;
    tracing::debug!(api_url = %config.api_url, tz = %config.timezone, "valet-console starting");

    if let Err(e) = run(cli.command, &config, client, store).await {
        match e.downcast_ref::<ConsoleError>() {
            Some(err) => {
                tracing::debug!(error = %err, "Command failed");
                eprintln!("{}", err.user_message());
                std::process::exit(1);
            }
            None => return Err(e),
        }
    }
    Ok(())
}

async fn run<A: ValetApi>(
    command: Command,
    config: &ConsoleConfig,
    api: A,
    store: SessionStore,
) -> anyhow::Result<()> {
    let tz = config.timezone;
    match command {
        Command::Login {
            country_code,
            phone,
        } => login(SignInController::new(api, store), &country_code, &phone).await?,
        Command::Logout => {
            SignInController::new(api, store).logout()?;
            println!("Signed out.");
        }
        Command::List { page } => {
            let mut list = EventListController::new(api, tz);
            list.refresh().await?;
            list.view_mut().go_to_page(page);
            print_page(&list);
        }
        Command::Create(args) => {
            let mut list = EventListController::new(api, tz);
            let mut form = list.begin_create();
            apply_args(&mut form, &args)?;
            let outcome = list.submit_form(&mut form).await?;
            println!("{}", outcome.message());
            if let SubmitOutcome::Created { qr, .. } = outcome {
                println!("{qr}");
            }
        }
        Command::Update { id, event } => {
            let mut list = EventListController::new(api, tz);
            list.refresh().await?;
            let mut form = list.begin_edit(&id)?;
            apply_args(&mut form, &event)?;
            let outcome = list.submit_form(&mut form).await?;
            println!("{}", outcome.message());
        }
        Command::Delete { id } => {
            let mut list = EventListController::new(api, tz);
            list.refresh().await?;
            list.delete_event(&id).await?;
            println!("{}", messages::EVENT_DELETED);
        }
        Command::DeleteMany { ids } => {
            let mut list = EventListController::new(api, tz);
            list.delete_many(&ids).await?;
            println!("{}", messages::EVENTS_DELETED);
        }
        Command::Qr { id, admin } => {
            let mut list = EventListController::new(api, tz);
            list.refresh().await?;
            if let Some(event_id) = list.view().row(&id).map(|r| r.event_id.clone()) {
                list.view_mut().set_admin(&event_id, admin);
            }
            println!("{}", list.generate_qr(&id)?);
        }
    }
    Ok(())
}

async fn login<A: ValetApi>(
    mut sign_in: SignInController<A>,
    country_code: &str,
    phone: &str,
) -> anyhow::Result<()> {
    sign_in.request_otp(country_code, phone).await?;
    println!("OTP sent to {country_code}{phone}.");

    loop {
        print!("Enter the 4-digit code (r to resend): ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            anyhow::bail!("No code entered");
        }
        let input = line.trim();

        if input.eq_ignore_ascii_case("r") {
            match sign_in.resend().await {
                Ok(()) => println!("{}", messages::OTP_RESENT),
                Err(e) => eprintln!("{}", e.user_message()),
            }
            continue;
        }

        match sign_in.verify(input).await {
            Ok(_) => {
                println!("{}", messages::OTP_VERIFIED);
                return Ok(());
            }
            Err(e @ ConsoleError::Session(_)) => return Err(e.into()),
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }
}

fn apply_args(form: &mut EventForm, args: &EventArgs) -> ConsoleResult<()> {
    if let Some(v) = &args.event_id {
        form.set_event_id(v.as_str());
    }
    if let Some(v) = &args.title {
        form.set_title(v.as_str());
    }
    if let Some(v) = &args.location {
        form.set_location(v.as_str());
    }
    if let Some(v) = &args.start_date {
        form.set_date_input(FormField::StartDate, v)?;
    }
    if let Some(v) = &args.end_date {
        form.set_date_input(FormField::EndDate, v)?;
    }
    if let Some(v) = &args.start_time {
        form.set_time_input(FormField::StartTime, v)?;
    }
    if let Some(v) = &args.end_time {
        form.set_time_input(FormField::EndTime, v)?;
    }
    Ok(())
}

fn print_page<A: ValetApi>(list: &EventListController<A>) {
    let tz = list.timezone();
    let view = list.view();
    if view.rows().is_empty() {
        println!("No events.");
        return;
    }

    let when = |event: &ValetEvent, start: bool| {
        let dt = if start { event.start_date } else { event.end_date };
        dt.map(|d| format!("{} {}", format_date(d, tz), format_clock(d, tz)))
            .unwrap_or_else(|| "-".to_string())
    };

    println!(
        "{:<26} {:<12} {:<20} {:<20} {:<16} {:<16}",
        "ID", "EVENT ID", "TITLE", "LOCATION", "START", "END"
    );
    for event in view.page_rows() {
        println!(
            "{:<26} {:<12} {:<20} {:<20} {:<16} {:<16}{}",
            event.id,
            event.event_id,
            event.title.as_deref().unwrap_or("-"),
            event.location.as_deref().unwrap_or("-"),
            when(event, true),
            when(event, false),
            if event.is_expired() { "  expired" } else { "" },
        );
    }
    println!("Page {} of {} ({} events)", view.page(), view.total_pages(), view.rows().len());
}
