//! An interactive terminal rendition of the portfolio's AI features.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::time::Duration;

use folio::{Site, SiteBuilder};
use folio_core::SummaryState;
use folio_gemini_model::{GeminiConfigBuilder, GeminiProvider};
use folio_notify::{NtfyConfigBuilder, NtfySink};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let builder = match env::var("GEMINI_API_KEY") {
        Ok(api_key) => {
            let mut config = GeminiConfigBuilder::with_api_key(api_key);
            if let Ok(model) = env::var("GEMINI_MODEL") {
                config = config.with_model(model);
            }
            if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
                config = config.with_base_url(base_url);
            }
            SiteBuilder::with_text_provider(GeminiProvider::new(
                config.build(),
            ))
        }
        Err(_) => {
            eprintln!(
                "GEMINI_API_KEY is not set; AI features will answer with a \
                 warning instead of calling the model"
            );
            SiteBuilder::unconfigured()
        }
    };

    let mut sink_config = NtfyConfigBuilder::new();
    if let Ok(topic) = env::var("NTFY_TOPIC") {
        sink_config = sink_config.with_topic(topic);
    }
    let site = builder.build(NtfySink::new(sink_config.build()));

    println!(
        "{} {}",
        "PELAYO.DEV".bright_white().bold(),
        "— demo de terminal".bright_black()
    );
    if let Some(greeting) = site.chat().messages().first() {
        println!("{}🤖 {}", BAR_CHAR.bright_cyan(), greeting.text);
    }
    print_help();

    loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        match cmd {
            "" => {}
            "projects" => list_projects(&site),
            "summarize" => summarize(&site, rest).await,
            "chat" => chat(&site, rest).await,
            "contact" => {
                if contact_flow(&site).await.is_none() {
                    break;
                }
            }
            "help" => print_help(),
            "quit" | "exit" => break,
            _ => println!("Comando desconocido: {cmd}"),
        }
    }
}

fn print_help() {
    println!("Comandos:");
    println!("  projects          Lista los proyectos destacados");
    println!("  summarize <n>     Genera el resumen IA del proyecto n");
    println!("  chat <mensaje>    Pregunta al asistente");
    println!("  contact           Rellena y envía el formulario de contacto");
    println!("  quit              Salir");
}

fn list_projects(site: &Site) {
    for (idx, project) in site.projects().iter().enumerate() {
        println!(
            "{}. {} {}",
            idx + 1,
            project.title.bright_white().bold(),
            format!("[{}]", project.kind).bright_black()
        );
        match site.summaries().state(&project.id) {
            SummaryState::Done(text) => {
                println!("   ✨ \"{}\"", text.bright_cyan().italic());
            }
            _ => println!("   {}", project.description),
        }
        println!("   {}", project.tags.join(" · ").bright_black());
    }
}

async fn summarize(site: &Site, arg: &str) {
    let Ok(idx) = arg.trim().parse::<usize>() else {
        println!("Uso: summarize <n>");
        return;
    };
    let Some(project) = site.projects().get(idx.wrapping_sub(1)) else {
        println!("No hay proyecto {idx}");
        return;
    };

    with_spinner(
        "✨ Generando resumen con IA...",
        site.summaries().summarize(
            &project.id,
            project.title,
            project.description,
        ),
    )
    .await;

    if let SummaryState::Done(text) = site.summaries().state(&project.id) {
        println!(
            "{}✨ \"{}\"",
            BAR_CHAR.bright_cyan(),
            text.bright_white().italic()
        );
    }
}

async fn chat(site: &Site, message: &str) {
    if message.trim().is_empty() {
        println!("Uso: chat <mensaje>");
        return;
    }

    with_spinner("🤔 Escribiendo...", site.chat().submit(message)).await;

    if let Some(last) = site.chat().messages().last() {
        println!("{}🤖 {}", BAR_CHAR.bright_cyan(), last.text.bright_white());
    }
}

async fn contact_flow(site: &Site) -> Option<()> {
    let contact = site.contact();
    contact.set_name(ask("Nombre: ").await?);
    contact.set_email(ask("Email: ").await?);
    contact.set_message(ask("Mensaje: ").await?);

    if contact.can_suggest() {
        let answer =
            ask("¿Quieres que la IA sugiera un asunto? [y/N]: ").await?;
        if answer.eq_ignore_ascii_case("y") {
            with_spinner(
                "✨ Pensando asuntos...",
                contact.suggest_subject(),
            )
            .await;

            let suggestions = contact.draft().suggestions;
            for (idx, subject) in suggestions.iter().enumerate() {
                println!("  {}. {subject}", idx + 1);
            }
            if !suggestions.is_empty() {
                let pick =
                    ask("Elige un asunto (enter para omitir): ").await?;
                if let Ok(n) = pick.parse::<usize>() {
                    if let Some(subject) = suggestions.get(n.wrapping_sub(1))
                    {
                        contact.pick_subject(subject);
                        println!(
                            "Mensaje actualizado:\n{}",
                            contact.draft().message
                        );
                    }
                }
            }
        }
    }

    match with_spinner("📨 Enviando...", contact.submit()).await {
        Ok(()) => {
            println!("{}", "¡Mensaje Enviado!".bright_green().bold());
        }
        Err(err) => {
            println!("{}", err.to_string().bright_red().bold());
        }
    }
    Some(())
}

async fn ask(prompt: &str) -> Option<String> {
    print!("{prompt}");
    std::io::stdout().flush().unwrap();
    let line = read_line().await?;
    Some(line.trim().to_owned())
}

async fn with_spinner<T>(
    message: &'static str,
    fut: impl Future<Output = T>,
) -> T {
    let style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let bar = ProgressBar::new_spinner();
    bar.set_style(style);
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    let out = fut.await;

    bar.finish_and_clear();
    out
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
