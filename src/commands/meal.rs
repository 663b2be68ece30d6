use clap::{Args, ValueEnum};

use super::prompt;
use crate::analysis::{MealAnalysis, MealAnalyzer};
use crate::editor::{EditError, EditOperation, EditOption, EditOutcome, MealEditor, NO_MEALS};
use crate::models::MealEntry;
use crate::store::LogStore;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Storage and analysis needed by the meal commands
pub struct MealContext<'a> {
    pub store: &'a LogStore,
    pub analyzer: &'a MealAnalyzer,
}

/// Top-level choices of the interactive menu
const LOG_MEAL: &str = "Log a new meal";
const EDIT_MEAL: &str = "Edit an existing meal";

#[derive(Args)]
pub struct LogCommand {
    /// Path or URL of the meal photo (prompted if omitted)
    #[arg(long, short)]
    pub image: Option<String>,

    /// Comma-separated description of the meal (prompted if omitted)
    #[arg(long, short)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct EditCommand {
    /// Number of the meal to edit, as shown by `history` (prompted if omitted)
    #[arg(long, short)]
    pub index: Option<usize>,
}

#[derive(Args)]
pub struct HistoryCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl LogCommand {
    pub async fn run(&self, ctx: &MealContext<'_>) -> Result<(), Box<dyn std::error::Error>> {
        let mut entries = ctx.store.load()?;

        let image = prompt::text_or_prompt(&self.image, prompt::IMAGE_PROMPT)?;
        let description = prompt::text_or_prompt(&self.description, prompt::DESCRIPTION_PROMPT)?;

        let analysis = log_meal(ctx.analyzer, &mut entries, &description, &image).await;
        println!("{}", analysis.summary);

        ctx.store.save(&entries)?;
        println!("Meal logged successfully in {}", ctx.store.path().display());

        Ok(())
    }
}

impl EditCommand {
    pub async fn run(&self, ctx: &MealContext<'_>) -> Result<(), Box<dyn std::error::Error>> {
        let mut entries = ctx.store.load()?;

        if entries.is_empty() {
            println!("{}", NO_MEALS);
            return Ok(());
        }

        let index = match self.index {
            Some(n) if n >= 1 && n <= entries.len() => n - 1,
            Some(n) => {
                return Err(EditError::IndexOutOfRange {
                    index: n,
                    len: entries.len(),
                }
                .into())
            }
            None => {
                let choices: Vec<String> = entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| e.choice_label(i))
                    .collect();
                prompt::select("Select a meal to edit", &choices)?
            }
        };

        println!("Current meal details:");
        println!("{}", entries[index]);

        let option = EditOption::ALL[prompt::select(
            "How would you like to edit this meal?",
            &EditOption::ALL,
        )?];
        let operation = match option {
            EditOption::UploadImage => EditOperation::NewImage(prompt::text(prompt::IMAGE_PROMPT)?),
            EditOption::ChatUpdate => EditOperation::Chat(prompt::text(prompt::UPDATE_PROMPT)?),
            EditOption::CompareImage => {
                EditOperation::CompareImage(prompt::text(prompt::IMAGE_PROMPT)?)
            }
        };

        let editor = MealEditor::new(ctx.analyzer);
        match editor.edit_meal(&mut entries, index, &operation).await {
            Ok(EditOutcome::Applied { message, .. }) => {
                println!("{}", message);
                ctx.store.save(&entries)?;
                println!("Meal updated successfully in {}", ctx.store.path().display());
            }
            Ok(EditOutcome::Unchanged { reason }) => {
                println!("{}", reason);
            }
            Err(EditError::Fraction(e)) => {
                tracing::warn!("Portion adjustment rejected: {}", e);
                println!("Meal not updated: {}", e);
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}

impl HistoryCommand {
    pub fn run(&self, ctx: &MealContext<'_>) -> Result<(), Box<dyn std::error::Error>> {
        let entries = ctx.store.load()?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
            OutputFormat::Text => {
                if entries.is_empty() {
                    println!("No meals logged yet");
                    return Ok(());
                }
                print!("{}", format_history(&entries));
            }
        }

        Ok(())
    }
}

/// Interactive entry point used when no subcommand is given.
pub async fn run_interactive(ctx: &MealContext<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let actions = [LOG_MEAL, EDIT_MEAL];
    match actions[prompt::select("What would you like to do?", &actions)?] {
        LOG_MEAL => {
            LogCommand {
                image: None,
                description: None,
            }
            .run(ctx)
            .await
        }
        _ => EditCommand { index: None }.run(ctx).await,
    }
}

/// Analyzes a new meal and appends it to `entries`.
pub async fn log_meal(
    analyzer: &MealAnalyzer,
    entries: &mut Vec<MealEntry>,
    description: &str,
    image: &str,
) -> MealAnalysis {
    let analysis = analyzer.analyze(description, image).await;

    let entry = MealEntry::new(description, image)
        .with_food_items(analysis.food_items.clone())
        .with_nutrition(analysis.nutrition_details);
    entries.push(entry);

    analysis
}

fn format_history(entries: &[MealEntry]) -> String {
    let mut out = String::new();

    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {}  {} ({} kcal)\n",
            i + 1,
            entry.date.format("%Y-%m-%d %H:%M"),
            entry.description,
            entry.estimated_calories
        ));
        for record in &entry.history {
            out.push_str(&format!("       {}\n", record));
        }
    }

    out.push_str(&format!("\nTotal: {} meal(s)\n", entries.len()));
    out
}
