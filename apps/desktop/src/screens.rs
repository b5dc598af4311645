//! Login, admin and user screens over a [`Console`].

use std::io::{BufRead, Write};

use desktop_integration::{BrowserOpener, Notify, Prompt};
use registry_core::{AdminController, DeleteOutcome, EditOutcome, Registry, UserController};
use shared::{domain::Role, error::RegistryError, notice::Notice};
use storage::Snapshot;
use tracing::{debug, info};

use crate::{console::Console, footprint::FootprintForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Admin,
    User,
    Exit,
}

/// Drives the screens until the person quits or input ends.
pub fn run<R: BufRead, W: Write>(
    registry: &mut Registry,
    console: &mut Console<R, W>,
    opener: &dyn BrowserOpener,
) {
    let mut screen = Screen::Login;
    loop {
        debug!(?screen, "entering screen");
        screen = match screen {
            Screen::Login => login_screen(registry, console),
            Screen::Admin => admin_screen(registry, console, opener),
            Screen::User => user_screen(registry, console, opener),
            Screen::Exit => break,
        };
    }
    info!("exiting");
}

fn notify<R: BufRead, W: Write>(console: &mut Console<R, W>, err: RegistryError) {
    let notice = Notice::from(err);
    debug!(code = ?notice.code, "notifying");
    console.show(&notice.to_string());
}

fn login_screen<R: BufRead, W: Write>(
    registry: &mut Registry,
    console: &mut Console<R, W>,
) -> Screen {
    loop {
        console.emit("");
        console.emit("== User Login ==");
        let Some(username) = console.ask_text("Username:", None) else {
            return Screen::Exit;
        };
        let Some(password) = console.ask_text("Password:", None) else {
            return Screen::Exit;
        };
        match registry.session_mut().login(&username, &password) {
            Ok(Role::Admin) => return Screen::Admin,
            Ok(Role::User) => return Screen::User,
            Err(err) => notify(console, err),
        }
    }
}

fn render_names<R: BufRead, W: Write>(console: &mut Console<R, W>, snapshot: &Snapshot) {
    debug!(revision = snapshot.revision(), len = snapshot.len(), "rendering records");
    for (position, record) in snapshot.iter().enumerate() {
        console.emit(&format!("  [{}] {}", position + 1, record.name));
    }
}

/// Reads a 1-based list number. Blank, cancelled or unparsable input selects nothing.
fn read_position<R: BufRead, W: Write>(console: &mut Console<R, W>, label: &str) -> Option<usize> {
    let raw = console.ask_text(label, None)?;
    raw.trim().parse::<usize>().ok()?.checked_sub(1)
}

fn admin_screen<R: BufRead, W: Write>(
    registry: &mut Registry,
    console: &mut Console<R, W>,
    opener: &dyn BrowserOpener,
) -> Screen {
    let next = match registry.admin() {
        Ok(mut admin) => admin_menu(&mut admin, console, opener),
        Err(err) => {
            notify(console, err);
            Screen::Login
        }
    };
    registry.session_mut().logout();
    next
}

fn admin_menu<R: BufRead, W: Write>(
    admin: &mut AdminController<'_>,
    console: &mut Console<R, W>,
    opener: &dyn BrowserOpener,
) -> Screen {
    loop {
        let choice = console.choose(
            "URL Management",
            &["Upload", "Edit and Delete", "Check", "Log Out"],
        );
        match choice {
            Some(0) => {
                if admin.upload(console).is_none() {
                    debug!("upload cancelled");
                }
            }
            Some(1) => edit_and_delete(admin, console),
            Some(2) => {
                let snapshot = admin.records();
                if let Some(position) = pick_from(console, &snapshot, "Check") {
                    if let Err(err) = admin.open_selected(position, &snapshot, opener) {
                        notify(console, err);
                    }
                }
            }
            Some(_) => return Screen::Login,
            None => return Screen::Exit,
        }
    }
}

fn pick_from<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    snapshot: &Snapshot,
    title: &str,
) -> Option<usize> {
    console.emit(&format!("-- {title} --"));
    render_names(console, snapshot);
    read_position(console, "Record number to open (blank to go back):")
}

fn edit_and_delete<R: BufRead, W: Write>(
    admin: &mut AdminController<'_>,
    console: &mut Console<R, W>,
) {
    let snapshot = admin.records();
    console.emit("-- Edit and delete --");
    render_names(console, &snapshot);

    let Some(action) = console.ask_text("(e)dit, (d)elete or blank to go back:", None) else {
        return;
    };
    let action = action.trim().to_ascii_lowercase();
    if action.is_empty() {
        return;
    }

    let selected = read_position(console, "Record number:").and_then(|p| snapshot.id_at(p));
    let result = match action.as_str() {
        "e" | "edit" => admin
            .edit_with_prompt(selected, console)
            .map(|outcome| match outcome {
                EditOutcome::Edited => console.emit("Record updated."),
                EditOutcome::Cancelled => debug!("edit cancelled"),
            }),
        "d" | "delete" => admin
            .delete_record(selected, console)
            .map(|outcome| match outcome {
                DeleteOutcome::Deleted(record) => {
                    console.emit(&format!("Deleted {}.", record.name))
                }
                DeleteOutcome::Declined => debug!("delete declined"),
            }),
        _ => {
            console.show("Unknown action.");
            Ok(())
        }
    };
    if let Err(err) = result {
        notify(console, err);
    }
}

fn user_screen<R: BufRead, W: Write>(
    registry: &mut Registry,
    console: &mut Console<R, W>,
    opener: &dyn BrowserOpener,
) -> Screen {
    let next = match registry.user() {
        Ok(user) => user_menu(user, console, opener),
        Err(err) => {
            notify(console, err);
            Screen::Login
        }
    };
    registry.session_mut().logout();
    next
}

fn user_menu<R: BufRead, W: Write>(
    user: UserController<'_>,
    console: &mut Console<R, W>,
    opener: &dyn BrowserOpener,
) -> Screen {
    loop {
        let choice = console.choose(
            "User Interface",
            &[
                "Open Carbon Footprint Calculator",
                "View Data",
                "View Data with Keyword",
                "Log Out",
            ],
        );
        let listing = match choice {
            Some(0) => {
                user.open_footprint_form(&mut FootprintForm::new(console, opener));
                return Screen::Exit;
            }
            Some(1) => user.browse().map(Some),
            Some(2) => user.browse_by_keyword(console),
            Some(_) => return Screen::Login,
            None => return Screen::Exit,
        };
        match listing {
            Ok(Some(snapshot)) => {
                if let Some(position) = pick_from(console, &snapshot, "View Data") {
                    if let Err(err) = user.open_selected(position, &snapshot, opener) {
                        notify(console, err);
                    }
                }
            }
            Ok(None) => debug!("keyword search cancelled"),
            Err(err) => notify(console, err),
        }
    }
}

#[cfg(test)]
#[path = "tests/screens_tests.rs"]
mod tests;
