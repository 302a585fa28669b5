use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use luna::commands::{CommandContext, CommandRegistry};
use luna::core::Config;
use luna::database::Database;
use luna::discord::{self, register_global_commands, register_guild_commands, DiscordNotifier};
use luna::dispatcher::Dispatcher;
use luna::features::reminders::ReminderScheduler;
use luna::rate_limiter::RateLimiter;

struct Handler {
    dispatcher: Arc<Dispatcher>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        // Guild commands update instantly, global ones can take an hour
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            } else {
                info!("✅ Registered {} commands for guild {guild_id}", self.dispatcher.registry().len());
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            } else {
                info!("✅ Registered {} commands globally", self.dispatcher.registry().len());
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                discord::answer_command(&self.dispatcher, &ctx, &command).await
            }
            Interaction::MessageComponent(component) => {
                discord::answer_component(&self.dispatcher, &ctx, &component).await
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Luna...");

    let database = Database::new(&config.database_path).await?;

    // DMs go out through their own HTTP client so the scheduler can start before the gateway
    let notifier = Arc::new(DiscordNotifier::new(Arc::new(Http::new(&config.discord_token))));

    let context = Arc::new(CommandContext::new(database.clone(), notifier.clone()));
    let dispatcher = Arc::new(Dispatcher::new(
        context,
        CommandRegistry::with_all_handlers(),
        RateLimiter::new(config.rate_limit_max_actions, config.rate_limit_window),
    ));

    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let handler = Handler {
        dispatcher,
        guild_id,
    };

    // Slash commands and components arrive as interactions, DMs need no privileged intent
    let intents = GatewayIntents::DIRECT_MESSAGES;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    let scheduler = ReminderScheduler::new(database, notifier, config.reminder_interval);
    tokio::spawn(scheduler.run());

    info!("Establishing WebSocket connection to Discord gateway...");
    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
