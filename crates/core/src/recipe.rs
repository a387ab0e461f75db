//! Recipe steps and their exact command lines.
//!
//! A [`Step`] is one external invocation in a task recipe. [`Step::to_call`]
//! produces the precise argv contract the external `do.py` tooling expects;
//! no other module builds command lines.

use std::path::Path;

use crate::command::ProcessCall;
use crate::layout::Layout;

/// Trial-set flavor passed to the trial generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialKind {
    /// Behavioral trial set (`trials-b`), the input to psychometric-style
    /// analyses.
    Behavior,
    /// Analysis trial set (`trials-a`), the input to unit sorting.
    Analysis,
}

impl TrialKind {
    /// Single-letter tag used on the command line.
    pub fn tag(self) -> &'static str {
        match self {
            TrialKind::Behavior => "b",
            TrialKind::Analysis => "a",
        }
    }
}

/// One external invocation in a task recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Train a model, optionally with a fixed seed and `_s<seed>` suffix.
    Train { model: String, seed: Option<u32> },
    /// Generate a trial set for a trained model.
    Trials {
        model: String,
        kind: TrialKind,
        count: u32,
        seed: Option<u32>,
    },
    /// Run an analysis action against a trained model.
    Action {
        model: String,
        action: String,
        /// Analysis module override; defaults to the model name truncated
        /// at the first underscore.
        analysis: Option<String>,
        /// Free-form trailing arguments, placed after any seed suffix.
        extra: Vec<String>,
        seed: Option<u32>,
    },
    /// Render a standalone paper figure.
    Figure { script: String, extra: Vec<String> },
    /// Remove a model's work products via `do.py clean`.
    Clean { model: String },
}

impl Step {
    /// Unseeded training step.
    pub fn train(model: impl Into<String>) -> Self {
        Step::Train {
            model: model.into(),
            seed: None,
        }
    }

    /// Unseeded trial-generation step.
    pub fn trials(model: impl Into<String>, kind: TrialKind, count: u32) -> Self {
        Step::Trials {
            model: model.into(),
            kind,
            count,
            seed: None,
        }
    }

    /// Analysis action with the default analysis module and no extra
    /// arguments.
    pub fn action(model: impl Into<String>, action: impl Into<String>) -> Self {
        Step::Action {
            model: model.into(),
            action: action.into(),
            analysis: None,
            extra: Vec::new(),
            seed: None,
        }
    }

    /// Analysis action with free-form trailing arguments.
    pub fn action_with_args(
        model: impl Into<String>,
        action: impl Into<String>,
        extra: &[&str],
    ) -> Self {
        Step::Action {
            model: model.into(),
            action: action.into(),
            analysis: None,
            extra: extra.iter().map(|s| s.to_string()).collect(),
            seed: None,
        }
    }

    /// Figure script with no arguments.
    pub fn figure(script: impl Into<String>) -> Self {
        Step::Figure {
            script: script.into(),
            extra: Vec::new(),
        }
    }

    /// Figure script with arguments.
    pub fn figure_with_args(script: impl Into<String>, extra: &[&str]) -> Self {
        Step::Figure {
            script: script.into(),
            extra: extra.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Cleanup step for a model's work products.
    pub fn clean(model: impl Into<String>) -> Self {
        Step::Clean {
            model: model.into(),
        }
    }

    /// Stamp a sweep seed onto the step. Figures and cleanup are
    /// seed-independent and pass through unchanged.
    pub fn with_seed(&self, seed: u32) -> Step {
        let mut step = self.clone();
        match &mut step {
            Step::Train { seed: s, .. }
            | Step::Trials { seed: s, .. }
            | Step::Action { seed: s, .. } => *s = Some(seed),
            Step::Figure { .. } | Step::Clean { .. } => {}
        }
        step
    }

    /// For training steps, the (model, seed) pair that names the timing
    /// record.
    pub fn train_target(&self) -> Option<(&str, Option<u32>)> {
        match self {
            Step::Train { model, seed } => Some((model, *seed)),
            _ => None,
        }
    }

    /// Build the exact command this step runs.
    pub fn to_call(&self, layout: &Layout) -> ProcessCall {
        match self {
            Step::Train { model, seed } => {
                let mut call = do_call(layout, model).arg("train");
                if let Some(seed) = seed {
                    call = call
                        .arg("--seed")
                        .arg(seed.to_string())
                        .arg("--suffix")
                        .arg(suffix_arg(*seed));
                }
                call
            }
            Step::Trials {
                model,
                kind,
                count,
                seed,
            } => {
                let mut call = run_call(layout, model, None)
                    .arg(format!("trials-{}", kind.tag()))
                    .arg(count.to_string());
                if let Some(seed) = seed {
                    call = call.arg("--suffix").arg(suffix_arg(*seed));
                }
                call
            }
            Step::Action {
                model,
                action,
                analysis,
                extra,
                seed,
            } => {
                let mut call = run_call(layout, model, analysis.as_deref()).arg(action.clone());
                if let Some(seed) = seed {
                    call = call.arg("--suffix").arg(suffix_arg(*seed));
                }
                call.args(extra.iter().cloned())
            }
            Step::Figure { script, extra } => ProcessCall::new(layout.python())
                .arg(path_arg(&layout.figure_script(script)))
                .args(extra.iter().cloned()),
            Step::Clean { model } => do_call(layout, model).arg("clean"),
        }
    }
}

/// Analysis module used when a step does not name one: the model name
/// truncated at the first underscore (`rdm_fixed` -> `rdm`).
pub fn default_analysis(model: &str) -> &str {
    model.split('_').next().unwrap_or(model)
}

/// `python <do.py> <models/model>`, the prefix shared by train, run, and
/// clean verbs.
fn do_call(layout: &Layout, model: &str) -> ProcessCall {
    ProcessCall::new(layout.python())
        .arg(path_arg(layout.do_script()))
        .arg(path_arg(&layout.model_path(model)))
}

/// `python <do.py> <models/model> run <analysis/name>`, the prefix shared
/// by trial generation and analysis actions.
fn run_call(layout: &Layout, model: &str, analysis: Option<&str>) -> ProcessCall {
    let analysis = analysis.unwrap_or_else(|| default_analysis(model));
    do_call(layout, model)
        .arg("run")
        .arg(path_arg(&layout.analysis_path(analysis)))
}

fn suffix_arg(seed: u32) -> String {
    format!("_s{seed}")
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::new("/r")
    }

    fn argv(step: &Step) -> Vec<String> {
        let call = step.to_call(&layout());
        let mut line = vec![call.program().to_string()];
        line.extend(call.argv().iter().cloned());
        line
    }

    #[test]
    fn train_without_seed() {
        assert_eq!(
            argv(&Step::train("mante")),
            [
                "python",
                "/r/examples/do.py",
                "/r/examples/models/mante",
                "train",
            ],
        );
    }

    #[test]
    fn train_with_seed_passes_seed_and_suffix() {
        assert_eq!(
            argv(&Step::train("mante").with_seed(101)),
            [
                "python",
                "/r/examples/do.py",
                "/r/examples/models/mante",
                "train",
                "--seed",
                "101",
                "--suffix",
                "_s101",
            ],
        );
    }

    #[test]
    fn trials_behavioral_tag_and_count() {
        assert_eq!(
            argv(&Step::trials("rdm_fixed", TrialKind::Behavior, 5000)),
            [
                "python",
                "/r/examples/do.py",
                "/r/examples/models/rdm_fixed",
                "run",
                "/r/examples/analysis/rdm",
                "trials-b",
                "5000",
            ],
        );
    }

    #[test]
    fn trials_analysis_tag() {
        let step = Step::trials("mante", TrialKind::Analysis, 20);
        let call = step.to_call(&layout());
        assert!(call.argv().contains(&"trials-a".to_string()));
        assert!(call.argv().contains(&"20".to_string()));
    }

    #[test]
    fn seeded_trials_put_suffix_after_count() {
        assert_eq!(
            argv(&Step::trials("mante", TrialKind::Behavior, 200).with_seed(103)),
            [
                "python",
                "/r/examples/do.py",
                "/r/examples/models/mante",
                "run",
                "/r/examples/analysis/mante",
                "trials-b",
                "200",
                "--suffix",
                "_s103",
            ],
        );
    }

    #[test]
    fn action_uses_derived_analysis_module() {
        assert_eq!(
            argv(&Step::action("rdm_fixed", "psychometric")),
            [
                "python",
                "/r/examples/do.py",
                "/r/examples/models/rdm_fixed",
                "run",
                "/r/examples/analysis/rdm",
                "psychometric",
            ],
        );
    }

    #[test]
    fn action_analysis_override_is_respected() {
        let step = Step::Action {
            model: "rdm_fixed".to_string(),
            action: "sort".to_string(),
            analysis: Some("shared".to_string()),
            extra: Vec::new(),
            seed: None,
        };
        let call = step.to_call(&layout());
        assert!(call.argv().contains(&"/r/examples/analysis/shared".to_string()));
    }

    #[test]
    fn action_extra_arguments_trail_the_action() {
        assert_eq!(
            argv(&Step::action_with_args(
                "padoaschioppa2006",
                "sort_epoch",
                &["prechoice", "value", "separate-by-choice"],
            )),
            [
                "python",
                "/r/examples/do.py",
                "/r/examples/models/padoaschioppa2006",
                "run",
                "/r/examples/analysis/padoaschioppa2006",
                "sort_epoch",
                "prechoice",
                "value",
                "separate-by-choice",
            ],
        );
    }

    #[test]
    fn seeded_action_suffix_precedes_extra_arguments() {
        assert_eq!(
            argv(&Step::action_with_args("romo", "sort", &["value"]).with_seed(102)),
            [
                "python",
                "/r/examples/do.py",
                "/r/examples/models/romo",
                "run",
                "/r/examples/analysis/romo",
                "sort",
                "--suffix",
                "_s102",
                "value",
            ],
        );
    }

    #[test]
    fn figure_script_with_and_without_arguments() {
        assert_eq!(
            argv(&Step::figure("fig1_rdm")),
            ["python", "/r/paper/fig1_rdm.py"],
        );
        assert_eq!(
            argv(&Step::figure_with_args("fig_learning", &["mante"])),
            ["python", "/r/paper/fig_learning.py", "mante"],
        );
    }

    #[test]
    fn clean_uses_the_clean_verb() {
        assert_eq!(
            argv(&Step::clean("romo")),
            [
                "python",
                "/r/examples/do.py",
                "/r/examples/models/romo",
                "clean",
            ],
        );
    }

    #[test]
    fn with_seed_leaves_figures_and_clean_unchanged() {
        let fig = Step::figure("fig1_rdm");
        assert_eq!(fig.with_seed(101), fig);
        let clean = Step::clean("romo");
        assert_eq!(clean.with_seed(101), clean);
    }

    #[test]
    fn default_analysis_truncates_at_first_underscore() {
        assert_eq!(default_analysis("rdm_fixed"), "rdm");
        assert_eq!(default_analysis("rdm_rt"), "rdm");
        assert_eq!(default_analysis("mante"), "mante");
        assert_eq!(default_analysis("padoaschioppa2006_1A3B"), "padoaschioppa2006");
    }

    #[test]
    fn train_target_identifies_training_steps_only() {
        assert_eq!(
            Step::train("mante").with_seed(101).train_target(),
            Some(("mante", Some(101))),
        );
        assert_eq!(Step::train("mante").train_target(), Some(("mante", None)));
        assert_eq!(Step::action("mante", "sort").train_target(), None);
        assert_eq!(Step::figure("fig1_rdm").train_target(), None);
    }

    #[test]
    fn interpreter_override_reaches_every_call() {
        let layout = Layout::new("/r").with_python("python3");
        for step in [
            Step::train("mante"),
            Step::trials("mante", TrialKind::Behavior, 1),
            Step::action("mante", "sort"),
            Step::figure("fig1_rdm"),
            Step::clean("mante"),
        ] {
            assert_eq!(step.to_call(&layout).program(), "python3");
        }
    }
}
