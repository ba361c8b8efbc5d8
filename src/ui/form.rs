use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Whether `value` looks like an email address: `local@domain.tld`, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Textarea,
    MultiSelect { options: Vec<String> },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub placeholder: String,
    pub kind: FieldKind,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        placeholder: impl Into<String>,
        kind: FieldKind,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            placeholder: placeholder.into(),
            kind,
        }
    }

    pub fn options(&self) -> &[String] {
        match &self.kind {
            FieldKind::MultiSelect { options } => options,
            _ => &[],
        }
    }
}

/// Display letter of the `index`-th multiselect option: `A`, `B`, ...
pub fn option_letter(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
}

/// The five questions of the contact wizard.
pub fn contact_questions() -> Vec<Question> {
    vec![
        Question::new(
            "name",
            "What's your name?",
            "Enter your full name...",
            FieldKind::Text,
        ),
        Question::new(
            "email",
            "What's your email address?",
            "Enter your email...",
            FieldKind::Email,
        ),
        Question::new(
            "serviceType",
            "What service are you interested in?",
            "Select a service",
            FieldKind::MultiSelect {
                options: [
                    "Web Development",
                    "Mobile App Development",
                    "UI/UX Design",
                    "E-commerce Solutions",
                    "Digital Marketing",
                    "Consulting",
                ]
                .map(String::from)
                .to_vec(),
            },
        ),
        Question::new(
            "phone",
            "What's your phone number?",
            "Enter your phone number...",
            FieldKind::Tel,
        ),
        Question::new(
            "message",
            "Tell us about your project",
            "Describe your project in detail...",
            FieldKind::Textarea,
        ),
    ]
}

/// An answer value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
}

/// Why the current answer was not accepted. The caller shakes the input and stays on the step.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ValidationFailure {
    pub step: usize,
    pub field: String,
    pub reason: &'static str,
}

/// All answers, keyed by question id.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Submission {
    pub answers: BTreeMap<String, Answer>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced(usize),
    Completed(Submission),
}

/// Multi-step contact form. One question at a time; answers are kept when moving back.
#[derive(Clone, Debug)]
pub struct ContactWizard {
    questions: Vec<Question>,
    answers: Vec<Answer>,
    step: usize,
}

impl Default for ContactWizard {
    fn default() -> Self {
        Self::new(contact_questions())
    }
}

impl ContactWizard {
    /// An empty question list yields a wizard that completes on the first `next`.
    pub fn new(questions: Vec<Question>) -> Self {
        let answers = questions
            .iter()
            .map(|q| match q.kind {
                FieldKind::MultiSelect { .. } => Answer::Choices(Vec::new()),
                _ => Answer::Text(String::new()),
            })
            .collect();
        Self {
            questions,
            answers,
            step: 0,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self) -> Option<&Question> {
        self.questions.get(self.step)
    }

    pub fn answer(&self) -> Option<&Answer> {
        self.answers.get(self.step)
    }

    /// Width of the progress bar: `(step + 1) / n`.
    pub fn progress_fraction(&self) -> f64 {
        if self.questions.is_empty() {
            return 1.0;
        }
        (self.step + 1) as f64 / self.questions.len() as f64
    }

    /// Replace the text answer of the current step. Ignored on multiselect steps.
    pub fn set_text(&mut self, value: impl Into<String>) {
        if let Some(Answer::Text(s)) = self.answers.get_mut(self.step) {
            *s = value.into();
        }
    }

    /// Add or remove `option` on the current multiselect step. Unknown options are ignored.
    pub fn toggle_option(&mut self, option: &str) -> bool {
        let Some(q) = self.questions.get(self.step) else {
            return false;
        };
        if !q.options().iter().any(|o| o == option) {
            return false;
        }
        let Some(Answer::Choices(chosen)) = self.answers.get_mut(self.step) else {
            return false;
        };
        if let Some(pos) = chosen.iter().position(|c| c == option) {
            chosen.remove(pos);
        } else {
            chosen.push(option.to_owned());
        }
        true
    }

    pub fn is_selected(&self, option: &str) -> bool {
        matches!(self.answer(), Some(Answer::Choices(c)) if c.iter().any(|o| o == option))
    }

    fn check(&self) -> Result<(), ValidationFailure> {
        let (Some(q), Some(a)) = (self.questions.get(self.step), self.answers.get(self.step))
        else {
            return Ok(());
        };
        let reason = match (&q.kind, a) {
            (FieldKind::Email, Answer::Text(s)) if !is_valid_email(s) => {
                Some("not a valid email address")
            }
            (FieldKind::Text | FieldKind::Tel | FieldKind::Textarea, Answer::Text(s))
                if s.trim().is_empty() =>
            {
                Some("required")
            }
            (FieldKind::MultiSelect { .. }, Answer::Choices(c)) if c.is_empty() => {
                Some("select at least one option")
            }
            _ => None,
        };
        match reason {
            Some(reason) => Err(ValidationFailure {
                step: self.step,
                field: q.id.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Validate the current answer, then advance or submit.
    pub fn next(&mut self) -> Result<StepOutcome, ValidationFailure> {
        self.check()?;
        if self.step + 1 < self.questions.len() {
            self.step += 1;
            return Ok(StepOutcome::Advanced(self.step));
        }
        let answers = self
            .questions
            .iter()
            .zip(&self.answers)
            .map(|(q, a)| (q.id.clone(), a.clone()))
            .collect();
        tracing::debug!(fields = self.questions.len(), "contact form submitted");
        Ok(StepOutcome::Completed(Submission { answers }))
    }

    /// Go back one step; stays at 0. Returns whether the step changed.
    pub fn back(&mut self) -> bool {
        if self.step == 0 {
            return false;
        }
        self.step -= 1;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/form.rs"]
mod tests;
