//! Keyboard rendering for Discord components
//!
//! A keyboard becomes plain button rows when it fits Discord's limits of five
//! action rows with five buttons each. Larger keyboards (the month picker) are
//! drawn as a monospace grid in the message text; their actionable cells move
//! into select menus and the last row stays as buttons.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Button rows and grid fallback with select menus

use log::warn;
use serenity::builder::{CreateComponents, CreateInteractionResponse};
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::InteractionResponseType;

use crate::core::{truncate_for_message, Button, Keyboard, Reply, IGNORE_ACTION};

/// Action rows per message
pub const MAX_ROWS: usize = 5;
/// Buttons per action row
pub const MAX_BUTTONS_PER_ROW: usize = 5;
/// Options per select menu
pub const MAX_SELECT_OPTIONS: usize = 25;

/// Discord rejects blank button labels
const BLANK_LABEL: &str = "·";

/// Component ids must be unique within a message, so inert cells get a suffix
pub fn inert_id(row: usize, column: usize) -> String {
    format!("{IGNORE_ACTION}:{row}:{column}")
}

/// Map a component id back to the action code it stands for
pub fn normalize_action(custom_id: &str) -> &str {
    match custom_id.split_once(':') {
        Some((IGNORE_ACTION, _)) => IGNORE_ACTION,
        _ => custom_id,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectMenu {
    pub custom_id: String,
    pub placeholder: String,
    /// (label, action code)
    pub options: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentLayout {
    Buttons(Vec<Vec<Button>>),
    Grid {
        /// Monospace rendering of every row except the nav row
        grid: String,
        menus: Vec<SelectMenu>,
        nav: Vec<Button>,
    },
}

fn fits(keyboard: &Keyboard) -> bool {
    keyboard.rows.len() <= MAX_ROWS
        && keyboard.rows.iter().all(|row| row.len() <= MAX_BUTTONS_PER_ROW)
}

pub fn layout(keyboard: &Keyboard) -> ComponentLayout {
    if fits(keyboard) {
        return ComponentLayout::Buttons(keyboard.rows.clone());
    }

    let mut rows: &[Vec<Button>] = &keyboard.rows;
    let mut nav = Vec::new();
    if let Some((last, rest)) = rows.split_last() {
        if last.len() <= MAX_BUTTONS_PER_ROW && last.iter().all(|b| !b.is_inert()) {
            nav = last.clone();
            rows = rest;
        }
    }

    let grid = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| format!("{:>3}", button.label.trim()))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n");

    let options: Vec<(String, String)> = rows
        .iter()
        .flatten()
        .filter_map(|button| {
            button
                .action
                .as_ref()
                .map(|action| (button.label.trim().to_string(), action.clone()))
        })
        .collect();

    let menu_slots = MAX_ROWS - usize::from(!nav.is_empty());
    let chunks: Vec<&[(String, String)]> = options.chunks(MAX_SELECT_OPTIONS).collect();
    if chunks.len() > menu_slots {
        warn!(
            "Keyboard has {} selectable cells, only {} fit",
            options.len(),
            menu_slots * MAX_SELECT_OPTIONS
        );
    }
    let menus = chunks
        .into_iter()
        .take(menu_slots)
        .enumerate()
        .filter_map(|(i, chunk)| {
            let (first, last) = (chunk.first()?, chunk.last()?);
            Some(SelectMenu {
                custom_id: format!("select:{i}"),
                placeholder: format!("{} – {}", first.0, last.0),
                options: chunk.to_vec(),
            })
        })
        .collect();

    ComponentLayout::Grid { grid, menus, nav }
}

fn button_label(button: &Button) -> &str {
    if button.label.trim().is_empty() {
        BLANK_LABEL
    } else {
        &button.label
    }
}

fn button_rows(components: &mut CreateComponents, rows: &[Vec<Button>], first_row: usize) {
    for (r, row) in rows.iter().enumerate().filter(|(_, row)| !row.is_empty()) {
        components.create_action_row(|action_row| {
            for (c, button) in row.iter().enumerate() {
                action_row.create_button(|b| match &button.action {
                    Some(action) => b
                        .label(button_label(button))
                        .custom_id(action)
                        .style(ButtonStyle::Primary),
                    None => b
                        .label(button_label(button))
                        .custom_id(inert_id(first_row + r, c))
                        .style(ButtonStyle::Secondary)
                        .disabled(true),
                });
            }
            action_row
        });
    }
}

/// Message text and components for a keyboard
pub fn render(text: &str, keyboard: &Keyboard) -> (String, CreateComponents) {
    let mut components = CreateComponents::default();
    let content = match layout(keyboard) {
        ComponentLayout::Buttons(rows) => {
            button_rows(&mut components, &rows, 0);
            text.to_string()
        }
        ComponentLayout::Grid { grid, menus, nav } => {
            for menu in &menus {
                components.create_action_row(|row| {
                    row.create_select_menu(|select| {
                        select
                            .custom_id(&menu.custom_id)
                            .placeholder(&menu.placeholder)
                            .options(|opts| {
                                for (label, value) in &menu.options {
                                    opts.create_option(|o| o.label(label).value(value));
                                }
                                opts
                            })
                    })
                });
            }
            button_rows(&mut components, std::slice::from_ref(&nav), menus.len());
            format!("{text}\n```\n{grid}\n```")
        }
    };
    (truncate_for_message(&content), components)
}

/// Fill an interaction response for `reply`.
///
/// `from_component` is true when the interaction came from a button or menu,
/// which is the only case where the source message can be edited.
pub fn fill_response<'a, 'b>(
    response: &'b mut CreateInteractionResponse<'a>,
    reply: &Reply,
    from_component: bool,
) -> &'b mut CreateInteractionResponse<'a> {
    match reply {
        Reply::Send(message) | Reply::Edit(message) => {
            let kind = match reply {
                Reply::Edit(_) if from_component => InteractionResponseType::UpdateMessage,
                _ => InteractionResponseType::ChannelMessageWithSource,
            };
            let (content, components) = render(&message.text, &message.keyboard);
            response
                .kind(kind)
                .interaction_response_data(|data| data.content(content).set_components(components))
        }
        Reply::Alert(text) => response
            .kind(InteractionResponseType::ChannelMessageWithSource)
            .interaction_response_data(|data| {
                data.content(truncate_for_message(text)).ephemeral(true)
            }),
        Reply::Ack if from_component => {
            response.kind(InteractionResponseType::DeferredUpdateMessage)
        }
        Reply::Ack => response
            .kind(InteractionResponseType::ChannelMessageWithSource)
            .interaction_response_data(|data| data.content("✅").ephemeral(true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::calendar::CalendarSystem;
    use crate::features::datepicker::{render_month, TargetField};
    use chrono::NaiveDate;

    fn month_keyboard() -> Keyboard {
        render_month(
            TargetField::PeriodStart,
            CalendarSystem::Gregorian,
            NaiveDate::from_ymd_opt(2024, 2, 26).unwrap(),
        )
        .unwrap()
        .into_keyboard()
    }

    #[test]
    fn test_small_keyboard_stays_buttons() {
        let keyboard = Keyboard::new()
            .row(vec![Button::new("Today", "log_method_today")])
            .row(vec![Button::new("Pick", "log_method_picker")]);
        assert_eq!(layout(&keyboard), ComponentLayout::Buttons(keyboard.rows.clone()));
    }

    #[test]
    fn test_month_grid_falls_back_to_menus() {
        let ComponentLayout::Grid { grid, menus, nav } = layout(&month_keyboard()) else {
            panic!("month grid should not fit as buttons");
        };

        assert_eq!(nav.len(), 2);
        assert!(nav[1].action.as_deref().unwrap().starts_with("datepicker_nav_"));
        assert!(grid.starts_with("🗓️ February 2024"));
        assert!(grid.contains("  S  M  T  W  T  F  S"));

        assert_eq!(menus.len(), 2);
        let options: Vec<&(String, String)> = menus.iter().flat_map(|m| &m.options).collect();
        assert_eq!(options.len(), 29);
        assert_eq!(options[0].0, "1");
        assert_eq!(options[28].1, "datepicker_select_start_2024-02-29");
        assert_eq!(menus[0].placeholder, "1 – 25");
        assert_eq!(menus[1].placeholder, "26 – 29");
    }

    #[test]
    fn test_inert_ids_normalize_to_ignore() {
        assert_eq!(normalize_action(&inert_id(0, 3)), IGNORE_ACTION);
        assert_eq!(normalize_action("set_reminder_08:00"), "set_reminder_08:00");
        assert_ne!(inert_id(0, 1), inert_id(1, 0));
    }
}
