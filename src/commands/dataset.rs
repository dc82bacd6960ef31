use std::fmt::Write as _;

use crate::commands::send_chunked;
use crate::dataset::types::ExerciseTable;
use crate::state::Context;

/// Show what the loaded exercise dataset contains
#[poise::command(slash_command)]
pub async fn dataset(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    let data = ctx.data();
    let output = summarize(&data.table, &data.dataset_path.display().to_string());
    send_chunked(&ctx, &output).await
}

fn summarize(table: &ExerciseTable, source: &str) -> String {
    let mut output = String::from("**Exercise Dataset**\n\n");
    let _ = writeln!(output, "Source: `{}`", source);
    let _ = writeln!(output, "Exercises: {}", table.len());
    let _ = writeln!(output, "Columns: `{}`\n", table.columns().join("`, `"));

    output.push_str("**By type**\n");
    for (kind, count) in table.type_counts() {
        let _ = writeln!(output, "  - {}: {}", kind, count);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::types::ExerciseRecord;

    fn record(title: &str, kind: &str) -> ExerciseRecord {
        ExerciseRecord {
            title: title.to_string(),
            description: String::new(),
            kind: kind.to_string(),
            body_part: String::new(),
            equipment: String::new(),
            level: String::new(),
            rating: 0.0,
        }
    }

    #[test]
    fn test_summarize() {
        let table = ExerciseTable::new(
            vec!["Title".to_string(), "Type".to_string()],
            vec![
                record("Squat", "Strength"),
                record("Rowing", "Cardio"),
                record("Plank", "Strength"),
                record("Mystery", ""),
            ],
        );
        let text = summarize(&table, "megaGymDataset.csv");
        assert!(text.contains("Source: `megaGymDataset.csv`\n"));
        assert!(text.contains("Exercises: 4\n"));
        assert!(text.contains("Columns: `Title`, `Type`\n"));
        assert!(text.contains("  - Cardio: 1\n  - Strength: 2\n  - Unknown: 1\n"));
    }
}
