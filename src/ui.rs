// UI layer: provides the interactive menus on top of a `Prompter`.
// `DialoguerPrompter` is the terminal implementation using `dialoguer`;
// the flows themselves only see the trait, so they can be scripted.

use crate::auth::{self, Session, SignUpForm};
use crate::editor::{self, RecordSummary};
use crate::error::{RecordError, SignUpError};
use crate::model::{City, RecordField, Role};
use crate::policy::{self, Action};
use crate::prompt::{ask_choice, ask_secret, ask_text, Prompter};
use crate::records;
use crate::store::RecordStore;
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Terminal prompter. `Select::interact()` is keyboard-driven: arrow keys
/// and Enter pick an item.
#[derive(Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn text(&mut self, prompt: &str) -> Result<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        let answer = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(answer)
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        let choice = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(choice)
    }

    fn reject(&mut self, message: &str) {
        println!("{}", message.red());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartChoice {
    LogIn,
    SignUp,
    Quit,
}

/// Top-level flow: log in or sign up, then run the action menu until the
/// user quits. The store is saved after signup, after every action and on
/// quit; a failed save ends the flow with an error.
pub fn main_menu(store: &mut RecordStore, prompter: &mut dyn Prompter) -> Result<()> {
    let session = loop {
        let choice = ask_choice(
            prompter,
            "What would you like to do?",
            &[StartChoice::LogIn, StartChoice::SignUp, StartChoice::Quit],
            |c| match c {
                StartChoice::LogIn => "Log In",
                StartChoice::SignUp => "Sign Up",
                StartChoice::Quit => "Quit",
            },
        )?;
        println!();

        match choice {
            StartChoice::LogIn if store.is_empty() => {
                prompter.reject("There are no accounts yet, please sign up first.");
            }
            StartChoice::LogIn => break handle_login(store, prompter)?,
            StartChoice::SignUp => break handle_register(store, prompter)?,
            StartChoice::Quit => {
                store.save().context("Saving records on quit")?;
                return Ok(());
            }
        }
    };
    store.save().context("Saving records")?;
    action_menu(store, prompter, &session)
}

/// Collect credentials, re-prompting each until it matches a stored account.
pub fn handle_login(store: &RecordStore, prompter: &mut dyn Prompter) -> Result<Session> {
    let index = ask_text(prompter, "Enter your username", |name: &str| {
        auth::check_username(store, name)
    })?;
    let username = store.get(index)?.username.clone();
    let session = ask_secret(prompter, "Enter your password", |pw: &str| {
        auth::log_in(store, &username, pw)
    })?;
    println!("Welcome {}!", store.get(session.account)?.full_name);
    Ok(session)
}

/// Collect the signup fields, each validated on entry, and create the account.
pub fn handle_register(store: &mut RecordStore, prompter: &mut dyn Prompter) -> Result<Session> {
    let full_name = ask_text(prompter, "Enter your full name", |v: &str| {
        auth::validate_full_name(v).map(|_| v.to_string())
    })?;
    let date_of_birth = ask_text(
        prompter,
        "Enter your date of birth in the following format (dd.mm.yyyy)",
        |v: &str| auth::parse_date_of_birth(v).map(|_| v.to_string()),
    )?;
    let address = ask_text(prompter, "Enter your address", |v: &str| {
        auth::validate_address(v).map(|_| v.to_string())
    })?;
    let city = ask_choice(prompter, "Choose your town/city", &City::ALL, City::label)?;
    let conditions = prompter.text("Enter your conditions, separated by a comma")?;
    let prescriptions = prompter.text("Enter your prescriptions, separated by a comma")?;
    let username = ask_text(prompter, "Enter a username", |v: &str| {
        auth::validate_new_username(&*store, v).map(|_| v.to_string())
    })?;
    let password = ask_secret(prompter, "Enter a password", |v: &str| {
        auth::validate_password(v).map(|_| v.to_string())
    })?;
    let role = ask_choice(
        prompter,
        "Are you a patient or a healthcare provider?",
        &Role::ALL,
        Role::label,
    )?;

    let form = SignUpForm {
        full_name,
        date_of_birth,
        address,
        city,
        conditions: auth::parse_list(&conditions),
        prescriptions: auth::parse_list(&prescriptions),
        username,
        password,
        role,
    };

    // Argon2 takes a noticeable moment; show a spinner meanwhile.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Creating account...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = auth::sign_up(store, form);
    spinner.finish_and_clear();

    match result {
        Ok(session) => {
            println!("Account created.");
            Ok(session)
        }
        Err(SignUpError::Validation(e)) => {
            anyhow::bail!("Signup rejected {}: {}", e.field, e.reason)
        }
        Err(SignUpError::Auth(e)) => Err(e).context("Creating account"),
    }
}

/// Role-dependent action loop. Menu entries come from the access policy.
pub fn action_menu(
    store: &mut RecordStore,
    prompter: &mut dyn Prompter,
    session: &Session,
) -> Result<()> {
    let actions = policy::actions_for(session.role);
    let mut items: Vec<&str> = actions.iter().map(Action::label).collect();
    items.push("Quit");

    loop {
        println!();
        let choice = prompter.select("What would you like to do?", &items)?;
        let Some(&action) = actions.get(choice) else {
            store.save().context("Saving records on quit")?;
            return Ok(());
        };

        match run_action(store, prompter, session, action) {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => prompter.reject(&e.to_string()),
        }
        store.save().context("Saving records")?;
    }
}

fn run_action(
    store: &mut RecordStore,
    prompter: &mut dyn Prompter,
    session: &Session,
    action: Action,
) -> std::result::Result<(), RecordError> {
    if action == Action::ViewAll {
        for summary in records::view_all(store, session)? {
            print!("{}", render_record(&summary));
        }
        return Ok(());
    }

    let target = if action.targets_other() {
        let name = ask_patient(store, prompter)?;
        records::resolve_target(store, session, action, Some(name.as_str()))?
    } else {
        session.account
    };

    if action.is_update() {
        // Authorize before asking anything about the edit.
        policy::authorize(session, target, action)?;
        let field = ask_choice(
            prompter,
            "Which records would you like to update?",
            &RecordField::ALL,
            RecordField::label,
        )
        .map_err(prompt_failed)?;
        let prompt = format!("Enter your additional {}", field.label().to_lowercase());
        let entry = ask_text(prompter, &prompt, |v: &str| {
            editor::validate_entry(field, v).map(str::to_string)
        })
        .map_err(prompt_failed)?;
        records::update_record(store, session, target, action, field, &entry)?;
        println!("Records updated.");
    } else {
        let summary = records::view_record(store, session, target, action)?;
        print!("{}", render_record(&summary));
    }
    Ok(())
}

fn ask_patient(
    store: &RecordStore,
    prompter: &mut dyn Prompter,
) -> std::result::Result<String, RecordError> {
    ask_text(prompter, "What is the username of the patient?", |v: &str| {
        if v.trim().is_empty() {
            return Err("Please enter a username".to_string());
        }
        store
            .find_by_username(v.trim())
            .map(|a| a.username.clone())
            .map_err(|_| "This username is not in our records".to_string())
    })
    .map_err(prompt_failed)
}

// A prompter that can no longer answer (closed terminal, exhausted script)
// cannot continue the session either.
fn prompt_failed(e: anyhow::Error) -> RecordError {
    RecordError::Prompt(e.to_string())
}

/// Human readable record, without any password material.
pub fn render_record(summary: &RecordSummary) -> String {
    fn list(entries: &[String]) -> String {
        if entries.is_empty() {
            "None".to_string()
        } else {
            entries.join(", ")
        }
    }
    format!(
        "\n{}\n{}\n\n{}\nName: {}\nDate of Birth: {}\nAddress: {}\nCity: {}\n{}\nConditions: {}\nPrescriptions: {}\n\n",
        "Account".blue().bold(),
        summary.username,
        "/ Personal Information /".cyan(),
        summary.full_name,
        summary.date_of_birth,
        summary.address,
        summary.city,
        "/ Medical Information /".cyan(),
        list(&summary.conditions),
        list(&summary.prescriptions),
    )
}
