use crate::settings;
use crate::storage::LocalStorageBackend;
use crate::timers::BrowserScheduler;
use crate::utils::*;
use clap::Args;
use memorama_core as game;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

type Engine = game::MemoryEngine<BrowserScheduler, LocalStorageBackend>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Flip(game::CardId),
    Task(game::Task),
    Restart,
    ChangeDifficulty(game::Difficulty),
    TogglePause,
    DismissSummary,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    card: game::Card,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardId>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        card,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!("card");
    if card.is_flipped {
        class.push("flipped");
    }
    if card.is_matched {
        class.push("matched");
    }
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("{} clicked", card.id);
        callback.emit(card.id)
    });

    html! {
        <button {class} id={card.id.to_string()} {onclick} disabled={locked}>
            { if card.is_face_up() { card.symbol } else { "?" } }
        </button>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct StatsProps {
    stats: game::GameStats,
    best: Option<game::BestScore>,
    paused: bool,
}

#[function_component(StatsView)]
fn stats_component(props: &StatsProps) -> Html {
    let StatsProps {
        stats,
        best,
        paused,
    } = props.clone();

    let time = if paused {
        "PAUSED".to_string()
    } else {
        format_time(stats.time_elapsed)
    };

    html! {
        <nav class="stats">
            <aside><small>{"Moves"}</small><strong>{stats.moves.to_string()}</strong></aside>
            <aside class={classes!(paused.then_some("paused"))}><small>{"Time"}</small><strong>{time}</strong></aside>
            <aside><small>{"Score"}</small><strong>{stats.score.to_string()}</strong></aside>
            <aside>
                <small>{"Best"}</small>
                <strong>{ best.map_or_else(|| "-".to_string(), |best| best.score.to_string()) }</strong>
            </aside>
        </nav>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct WinSummaryProps {
    open: bool,
    stats: game::GameStats,
    difficulty: game::Difficulty,
    is_new_best: bool,
    on_restart: Callback<()>,
    on_close: Callback<()>,
}

#[function_component(WinSummaryView)]
fn win_summary_component(props: &WinSummaryProps) -> Html {
    let WinSummaryProps {
        open,
        stats,
        difficulty,
        is_new_best,
        on_restart,
        on_close,
    } = props.clone();

    let title = if is_new_best {
        "New Best Score!"
    } else {
        "Congratulations!"
    };

    html! {
        <dialog id="win-summary" {open} class={classes!(is_new_best.then_some("new-best"))}>
            <article>
                <h2>{title}</h2>
                <p>{format!("You completed the {} level!", difficulty)}</p>
                <ul>
                    <li>{format!("Moves: {}", stats.moves)}</li>
                    <li>{format!("Time: {}", format_time(stats.time_elapsed))}</li>
                    <li>{format!("Score: {}", stats.score)}</li>
                </ul>
                <footer>
                    <button onclick={move |_| on_restart.emit(())}>{"Play Again"}</button>
                    <button class="secondary" onclick={move |_| on_close.emit(())}>{"Close"}</button>
                </footer>
            </article>
        </dialog>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<String>,
}

impl GameProps {
    pub(crate) fn seed(&self) -> u64 {
        match self.seed.as_deref().map(str::parse::<u64>) {
            Some(Ok(seed)) => seed,
            Some(Err(err)) => {
                log::warn!("Ignoring invalid seed {:?}: {}", self.seed, err);
                js_random_seed()
            }
            None => js_random_seed(),
        }
    }
}

pub(crate) struct GameView {
    settings: settings::Settings,
    engine: Engine,
}

impl GameView {
    fn difficulty_select(&self, ctx: &Context<Self>) -> Html {
        let current = self.engine.state().difficulty;
        let onchange = ctx.link().batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            game::Difficulty::from_name(&select.value()).map(Msg::ChangeDifficulty)
        });

        html! {
            <select {onchange}>
                {
                    for game::Difficulty::ALL.into_iter().map(|difficulty| html! {
                        <option value={difficulty.name()} selected={difficulty == current}>
                            {difficulty.label()}
                        </option>
                    })
                }
            </select>
        }
    }

    fn pause_button(&self, ctx: &Context<Self>) -> Html {
        let state = self.engine.state();
        let label = if state.is_paused { "Resume" } else { "Pause" };
        let disabled = !state.is_game_started || state.is_game_won;

        html! {
            <button onclick={ctx.link().callback(|_| Msg::TogglePause)} {disabled}>{label}</button>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings: settings::Settings = LocalOrDefault::local_or_default();
        let seed = ctx.props().seed();
        log::debug!("seed: {}, difficulty: {}", seed, settings.difficulty);

        let engine = Engine::new(
            game::EngineConfig::default(),
            BrowserScheduler::new(ctx.link().clone()),
            LocalStorageBackend,
            seed,
            settings.difficulty,
        );
        Self { settings, engine }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(id) => self.engine.flip_card(id).has_update(),
            Task(task) => self.engine.run_task(task).has_update(),
            Restart => {
                log::debug!("restart");
                self.engine.restart_game();
                true
            }
            ChangeDifficulty(difficulty) => {
                log::debug!("change difficulty: {}", difficulty);
                self.engine.change_difficulty(difficulty);
                if self.settings.difficulty != difficulty {
                    self.settings.difficulty = difficulty;
                    self.settings.local_save();
                }
                true
            }
            TogglePause => self.engine.toggle_pause(),
            DismissSummary => {
                self.engine.dismiss_win_summary();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let snapshot = self.engine.snapshot();
        let state = snapshot.state;
        let grid_size = state.difficulty.config().grid_size;
        let locked = snapshot.is_resolving || state.is_paused || state.is_game_won;
        let callback = ctx.link().callback(Msg::Flip);

        html! {
            <div class="memorama">
                <StatsView
                    stats={self.engine.stats()}
                    best={snapshot.best_score.cloned()}
                    paused={state.is_paused}
                />
                <menu>
                    { self.difficulty_select(ctx) }
                    { self.pause_button(ctx) }
                    <button onclick={ctx.link().callback(|_| Msg::Restart)}>{"Restart"}</button>
                </menu>
                <section
                    class={classes!("board", state.is_paused.then_some("paused"))}
                    style={format!("grid-template-columns: repeat({}, 1fr)", grid_size)}
                >
                    {
                        for state.cards.iter().map(|&card| html! {
                            <CardView
                                key={card.id.to_string()}
                                {card}
                                locked={locked || !card.can_flip()}
                                callback={callback.clone()}
                            />
                        })
                    }
                </section>
                <WinSummaryView
                    open={snapshot.show_win_summary}
                    stats={self.engine.stats()}
                    difficulty={state.difficulty}
                    is_new_best={snapshot.is_new_best}
                    on_restart={ctx.link().callback(|_| Msg::Restart)}
                    on_close={ctx.link().callback(|_| Msg::DismissSummary)}
                />
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_seed_is_used() {
        let props = GameProps {
            seed: Some("42".to_string()),
        };
        assert_eq!(props.seed(), 42);
    }
}
