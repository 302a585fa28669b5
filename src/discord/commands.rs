//! Slash command definitions and registration

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::{Command, CommandOptionType};
use serenity::model::id::GuildId;
use serenity::prelude::Context;

/// Name of the /start option carrying a pairing code
pub const CODE_OPTION: &str = "code";

const DESCRIPTIONS: [(&str, &str); 10] = [
    ("help", "Show what Luna can do for you"),
    ("settings", "Change your language or calendar"),
    ("track", "Log the start or end of your period"),
    ("symptoms", "Log a symptom for today"),
    ("history", "View your recent cycles and prediction"),
    ("status", "Check in on your partner's cycle"),
    ("partner", "Get a code to connect your partner"),
    ("role", "Switch between tracking and supporting"),
    ("reminders", "Choose when to get PMS and period reminders"),
    ("seed", "Replace your history with sample cycles"),
];

/// Creates all slash command definitions
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    let mut commands = vec![create_start_command()];
    commands.extend(DESCRIPTIONS.iter().map(|(name, description)| {
        CreateApplicationCommand::default()
            .name(name)
            .description(description)
            .to_owned()
    }));
    commands
}

fn create_start_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("start")
        .description("Set up your account or connect to a partner")
        .create_option(|option| {
            option
                .name(CODE_OPTION)
                .description("Pairing code from your partner")
                .kind(CommandOptionType::String)
                .required(false)
        })
        .to_owned()
}

/// Registers all slash commands globally
pub async fn register_global_commands(ctx: &Context) -> Result<()> {
    let slash_commands = create_slash_commands();
    let count = slash_commands.len();

    Command::set_global_application_commands(&ctx.http, |commands| {
        for command in slash_commands {
            commands.add_application_command(command);
        }
        commands
    })
    .await?;

    info!("Global slash commands registered successfully ({count} commands)");
    Ok(())
}

/// Registers all slash commands for a specific guild (instant, for development)
pub async fn register_guild_commands(ctx: &Context, guild_id: GuildId) -> Result<()> {
    let slash_commands = create_slash_commands();
    let count = slash_commands.len();

    guild_id
        .set_application_commands(&ctx.http, |commands| {
            for command in slash_commands {
                commands.add_application_command(command);
            }
            commands
        })
        .await?;

    info!("Guild slash commands registered for {guild_id} ({count} commands)");
    Ok(())
}
