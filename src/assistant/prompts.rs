use rand::Rng;

use crate::dataset::types::ExerciseTable;
use crate::dataset::DatasetError;

use super::preferences::UserPreferences;

/// Number of dataset titles shown to the model as illustrative context.
pub const SAMPLE_SIZE: usize = 3;

/// Render the fitness-expert prompt for a query.
///
/// Samples `SAMPLE_SIZE` random titles from the table, so two calls with the
/// same inputs can differ in the example list. Instructions never change.
pub fn compose_prompt<R: Rng + ?Sized>(
    query: &str,
    table: &ExerciseTable,
    prefs: &UserPreferences,
    rng: &mut R,
) -> Result<String, DatasetError> {
    let samples = table.sample_titles(SAMPLE_SIZE, rng)?;

    Ok(format!(
        r#"You are a highly knowledgeable and helpful fitness expert.
The user has the following fitness preferences:
- Goal: {goal}
- Experience Level: {experience}
- Restrictions: {restrictions}
Please provide a detailed, thorough, and step-by-step explanation in response to the user's query.
If the user asks to describe a specific exercise, include:
- The purpose of the exercise
- The muscles targeted
- Equipment needed
- Proper form and technique
- Common mistakes to avoid
- Tips for progression or modifications
If the user asks a general fitness question, provide an in-depth answer tailored to their preferences.
I have a dataset of exercises including types, body parts, equipment, and difficulty levels. For example: {examples}.
User Query: {query}
"#,
        goal = prefs.goal_label(),
        experience = prefs.experience_label(),
        restrictions = prefs.restrictions_clause(),
        examples = samples.join(", "),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::preferences::{Experience, Goal};
    use crate::dataset::types::ExerciseRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table(titles: &[&str]) -> ExerciseTable {
        let records = titles
            .iter()
            .map(|t| ExerciseRecord {
                title: t.to_string(),
                description: String::new(),
                kind: "Strength".to_string(),
                body_part: "Chest".to_string(),
                equipment: String::new(),
                level: "Beginner".to_string(),
                rating: 0.0,
            })
            .collect();
        ExerciseTable::new(vec!["Title".to_string()], records)
    }

    fn example_line(prompt: &str) -> Vec<String> {
        let line = prompt
            .lines()
            .find(|l| l.starts_with("I have a dataset"))
            .unwrap();
        let list = line
            .split_once("For example: ")
            .unwrap()
            .1
            .trim_end_matches('.');
        list.split(", ").map(str::to_string).collect()
    }

    #[test]
    fn test_prompt_embeds_preferences_and_query() {
        let table = table(&["Bench Press", "Push-Up", "Squat", "Plank"]);
        let prefs = UserPreferences {
            goal: Some(Goal::BuildMuscle),
            experience: Some(Experience::Beginner),
            restrictions: false,
        };
        let mut rng = StdRng::seed_from_u64(42);
        let prompt =
            compose_prompt("Describe Bench Press?", &table, &prefs, &mut rng).unwrap();

        assert!(prompt.starts_with("You are a highly knowledgeable and helpful fitness expert."));
        assert!(prompt.contains("- Goal: Build Muscle\n"));
        assert!(prompt.contains("- Experience Level: Beginner\n"));
        assert!(prompt.contains("- Restrictions: with no specific restrictions\n"));
        assert!(prompt.contains("- Common mistakes to avoid\n"));
        assert!(prompt.ends_with("User Query: Describe Bench Press?\n"));
    }

    #[test]
    fn test_prompt_restrictions_and_defaults() {
        let table = table(&["Bench Press", "Push-Up", "Squat"]);
        let prefs = UserPreferences {
            restrictions: true,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let prompt = compose_prompt("How do I lose weight", &table, &prefs, &mut rng).unwrap();

        assert!(prompt.contains("- Goal: general fitness\n"));
        assert!(prompt.contains("- Experience Level: any\n"));
        assert!(prompt.contains("considering potential injuries or limitations"));
    }

    #[test]
    fn test_prompt_has_three_distinct_titles() {
        let titles = ["Bench Press", "Push-Up", "Squat", "Plank", "Deadlift", "Lunge"];
        let table = table(&titles);
        let prefs = UserPreferences::default();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..25 {
            let prompt = compose_prompt("q", &table, &prefs, &mut rng).unwrap();
            let mut examples = example_line(&prompt);
            assert_eq!(examples.len(), SAMPLE_SIZE);
            assert!(examples.iter().all(|e| titles.contains(&e.as_str())));
            examples.sort();
            examples.dedup();
            assert_eq!(examples.len(), SAMPLE_SIZE);
        }
    }

    #[test]
    fn test_prompt_insufficient_data() {
        let table = table(&["Bench Press", "Push-Up"]);
        let mut rng = StdRng::seed_from_u64(3);
        let err = compose_prompt("q", &table, &UserPreferences::default(), &mut rng).unwrap_err();
        assert!(matches!(err, DatasetError::InsufficientData { .. }));
    }
}
