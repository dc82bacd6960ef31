#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum Goal {
    #[name = "Weight Loss"]
    WeightLoss,
    #[name = "Build Muscle"]
    BuildMuscle,
    Endurance,
    #[name = "General Fitness"]
    GeneralFitness,
}

impl Goal {
    pub fn label(self) -> &'static str {
        match self {
            Self::WeightLoss => "Weight Loss",
            Self::BuildMuscle => "Build Muscle",
            Self::Endurance => "Endurance",
            Self::GeneralFitness => "General Fitness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

impl Experience {
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// Per-request fitness profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserPreferences {
    pub goal: Option<Goal>,
    pub experience: Option<Experience>,
    /// User has injuries or limitations. No detail is captured.
    pub restrictions: bool,
}

impl UserPreferences {
    pub fn goal_label(&self) -> &'static str {
        self.goal.map_or("general fitness", Goal::label)
    }

    pub fn experience_label(&self) -> &'static str {
        self.experience.map_or("any", Experience::label)
    }

    pub fn restrictions_clause(&self) -> &'static str {
        if self.restrictions {
            "considering potential injuries or limitations"
        } else {
            "with no specific restrictions"
        }
    }
}
