//! Built-in task catalog.
//!
//! Maps every supported keyword to its fixed recipe. Selected tasks always
//! execute in the order they appear here, whatever order the keywords were
//! given in; unknown keywords select nothing and repeated keywords still
//! run their task once.

use crate::recipe::{Step, TrialKind};

/// First seed of every built-in seed sweep.
pub const SWEEP_START_SEED: u32 = 101;

/// Number of seeds trained per built-in sweep.
pub const SWEEP_SEED_COUNT: u32 = 5;

/// Keyword run when the command line names no tasks.
pub const DEFAULT_KEYWORD: &str = "mante";

/// How a task's steps are scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Run the steps once, as written.
    Once(Vec<Step>),
    /// Repeat the steps for `n_train` consecutive seeds starting at
    /// `start_seed`, stamping each iteration's seed onto every step.
    PerSeed {
        start_seed: u32,
        n_train: u32,
        steps: Vec<Step>,
    },
}

/// One selectable unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    keyword: &'static str,
    banner: Option<&'static str>,
    plan: Plan,
}

/// One element of an expanded task: a progress line for stdout, or a
/// concrete step to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunItem {
    Banner(String),
    Step(Step),
}

impl Task {
    fn once(keyword: &'static str, banner: Option<&'static str>, steps: Vec<Step>) -> Self {
        Task {
            keyword,
            banner,
            plan: Plan::Once(steps),
        }
    }

    /// A sweep over the shared built-in seed range.
    fn sweep(keyword: &'static str, banner: Option<&'static str>, steps: Vec<Step>) -> Self {
        Task {
            keyword,
            banner,
            plan: Plan::PerSeed {
                start_seed: SWEEP_START_SEED,
                n_train: SWEEP_SEED_COUNT,
                steps,
            },
        }
    }

    pub fn keyword(&self) -> &'static str {
        self.keyword
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Expand the task into its ordered banner lines and concrete steps.
    ///
    /// Pure: suitable for asserting ordering and sweep shape without
    /// executing anything.
    pub fn items(&self) -> Vec<RunItem> {
        match &self.plan {
            Plan::Once(steps) => {
                let mut items = Vec::with_capacity(steps.len() + 1);
                if let Some(banner) = self.banner {
                    items.push(RunItem::Banner(format!("=> {banner}")));
                }
                items.extend(steps.iter().cloned().map(RunItem::Step));
                items
            }
            Plan::PerSeed {
                start_seed,
                n_train,
                steps,
            } => {
                let mut items = Vec::new();
                for seed in *start_seed..start_seed + n_train {
                    if let Some(banner) = self.banner {
                        items.push(RunItem::Banner(format!("=> {banner} (seed = {seed})")));
                    }
                    items.extend(steps.iter().map(|step| RunItem::Step(step.with_seed(seed))));
                }
                items
            }
        }
    }
}

/// The full catalog, in its fixed execution order.
pub fn builtin_tasks() -> Vec<Task> {
    let mut tasks = Vec::new();

    // Perceptual decision-making, fixed stimulus duration.
    let model = "rdm_fixed";
    tasks.push(Task::once(
        "rdm_fixed",
        Some("Perceptual decision-making (FD)"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 5000),
            Step::action(model, "psychometric"),
            Step::action(model, "correct_stimulus_duration"),
            Step::trials(model, TrialKind::Analysis, 50),
            Step::action(model, "sort"),
        ],
    ));
    tasks.push(Task::sweep(
        "rdm_fixed-seeds",
        Some("Perceptual decision-making (FD)"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 5000),
            Step::action(model, "psychometric"),
            Step::action(model, "correct_stimulus_duration"),
        ],
    ));

    // Perceptual decision-making, reaction time.
    let model = "rdm_rt";
    tasks.push(Task::once(
        "rdm_rt",
        Some("Perceptual decision-making (RT)"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 1000),
            Step::action(model, "psychometric"),
            Step::action(model, "chronometric"),
            Step::trials(model, TrialKind::Analysis, 50),
            Step::action(model, "sort"),
        ],
    ));
    tasks.push(Task::sweep(
        "rdm_rt-seeds",
        Some("Perceptual decision-making (RT)"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 1000),
            Step::action(model, "psychometric"),
            Step::action(model, "chronometric"),
        ],
    ));

    // Context-dependent integration.
    let model = "mante";
    tasks.push(Task::once(
        "mante",
        Some("Context-dependent integration"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 200),
            Step::action(model, "psychometric"),
            Step::trials(model, TrialKind::Analysis, 20),
            Step::action(model, "sort"),
        ],
    ));
    tasks.push(Task::sweep(
        "mante-seeds",
        Some("Context-dependent integration"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 200),
            Step::action(model, "psychometric"),
        ],
    ));

    // Multisensory integration.
    let model = "multisensory";
    tasks.push(Task::once(
        "multisensory",
        Some("Multisensory integration"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 1500),
            Step::action(model, "psychometric"),
            Step::trials(model, TrialKind::Analysis, 100),
            Step::action(model, "sort"),
        ],
    ));
    tasks.push(Task::sweep(
        "multisensory-seeds",
        Some("Multisensory integration"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 1500),
            Step::action(model, "psychometric"),
        ],
    ));

    // Parametric working memory.
    let model = "romo";
    tasks.push(Task::once(
        "romo",
        Some("Parametric working memory"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 100),
            Step::action(model, "performance"),
            Step::trials(model, TrialKind::Analysis, 20),
            Step::action(model, "sort"),
            Step::action_with_args(model, "sort", &["value"]),
        ],
    ));
    tasks.push(Task::sweep(
        "romo-seeds",
        Some("Parametric working memory"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 100),
            Step::action(model, "performance"),
        ],
    ));

    // Postdecision wager.
    let model = "postdecisionwager";
    tasks.push(Task::once(
        "postdecisionwager",
        Some("Postdecision wager"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 2500),
            Step::action(model, "sure_stimulus_duration"),
            Step::action(model, "correct_stimulus_duration"),
            Step::trials(model, TrialKind::Analysis, 100),
            Step::action(model, "sort"),
            Step::action_with_args(model, "sort", &["value"]),
        ],
    ));
    tasks.push(Task::sweep(
        "postdecisionwager-seeds",
        Some("Postdecision wager"),
        vec![Step::train(model)],
    ));

    // Economic choice.
    let model = "padoaschioppa2006";
    tasks.push(Task::once(
        "padoaschioppa2006",
        Some("Padoa-Schioppa 2006"),
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 200),
            Step::action(model, "choice_pattern"),
            Step::trials(model, TrialKind::Analysis, 200),
            Step::action_with_args(model, "sort_epoch", &["postoffer", "value"]),
            Step::action_with_args(model, "sort_epoch", &["latedelay", "value"]),
            Step::action_with_args(model, "sort_epoch", &["prechoice", "value"]),
            Step::action_with_args(
                model,
                "sort_epoch",
                &["prechoice", "value", "separate-by-choice"],
            ),
        ],
    ));
    tasks.push(Task::sweep(
        "padoaschioppa2006-seeds",
        Some("Padoa-Schioppa 2006"),
        vec![Step::train(model)],
    ));
    // Offer-ratio variant; runs without a banner.
    let model = "padoaschioppa2006_1A3B";
    tasks.push(Task::once(
        "padoaschioppa2006-1A3B",
        None,
        vec![
            Step::train(model),
            Step::trials(model, TrialKind::Behavior, 200),
            Step::action(model, "choice_pattern"),
        ],
    ));

    // Paper figures.
    tasks.push(Task::once("fig1_rdm", None, vec![Step::figure("fig1_rdm")]));
    tasks.push(Task::once(
        "fig_cognitive",
        None,
        vec![Step::figure("fig_cognitive")],
    ));
    tasks.push(Task::once(
        "fig_postdecisionwager",
        None,
        vec![Step::figure("fig_postdecisionwager")],
    ));
    tasks.push(Task::once(
        "fig_padoaschioppa2006",
        None,
        vec![Step::figure("fig_padoaschioppa2006")],
    ));
    tasks.push(Task::once(
        "fig_rdm_rt",
        None,
        vec![Step::figure("fig_rdm_rt")],
    ));
    tasks.push(Task::once(
        "fig-learning-mante",
        None,
        vec![Step::figure_with_args("fig_learning", &["mante"])],
    ));
    tasks.push(Task::once(
        "fig-learning-multisensory",
        None,
        vec![Step::figure_with_args("fig_learning", &["multisensory"])],
    ));
    tasks.push(Task::once(
        "fig-learning-romo",
        None,
        vec![Step::figure_with_args("fig_learning", &["romo"])],
    ));
    tasks.push(Task::once(
        "fig-learning-postdecisionwager",
        None,
        vec![Step::figure_with_args("fig_learning", &["postdecisionwager"])],
    ));
    tasks.push(Task::once(
        "fig-learning-padoaschioppa2006",
        None,
        vec![Step::figure_with_args("fig_learning", &["padoaschioppa2006"])],
    ));

    tasks
}

/// Select the built-in tasks matching `keywords`, in catalog order.
///
/// Matching is exact string membership. Unknown keywords select nothing
/// rather than erroring, and duplicates collapse to a single run.
pub fn select_tasks(keywords: &[String]) -> Vec<Task> {
    builtin_tasks()
        .into_iter()
        .filter(|task| keywords.iter().any(|keyword| keyword == task.keyword))
        .collect()
}

/// The keyword list used when none is supplied.
pub fn default_keywords() -> Vec<String> {
    vec![DEFAULT_KEYWORD.to_string()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
