use break_core::{CellView, ClickMode, Coord, Coord2, Difficulty, GameState, Session};
use gloo::timers::callback::Interval;
use yew::prelude::*;

use crate::utils::js_random_seed;

const TICK_MILLIS: u32 = 1000;

const RULES: [&str; 5] = [
    "Click on squares to reveal what's underneath.",
    "Numbers show how many mines are adjacent to that square.",
    "Use the flag button or right-click to mark suspected mines.",
    "Reveal all non-mine squares to win!",
    "Be careful - clicking on a mine ends the game!",
];

/// Generation counter bumped on every restart, ticks tagged with an older one are dropped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Epoch(u32);

impl Epoch {
    fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    fn accepts(self, tick: Epoch) -> bool {
        self == tick
    }

    fn offset(self) -> u64 {
        self.0.into()
    }
}

pub(crate) enum Msg {
    /// Primary click, follows the current mode.
    Cell(Coord2),
    /// Right click, always flags.
    CellAlt(Coord2),
    ToggleFlagMode,
    NewGame,
    SetDifficulty(Difficulty),
    ToggleRules,
    /// Carries the epoch of the session that scheduled it.
    Tick(Epoch),
}

impl Msg {
    /// Target and effective mode of a cell click, `None` for every other message.
    fn cell_click(&self, mode: ClickMode) -> Option<(Coord2, ClickMode)> {
        match *self {
            Msg::Cell(coords) => Some((coords, mode)),
            Msg::CellAlt(coords) => Some((coords, ClickMode::Flag)),
            _ => None,
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    #[prop_or_default]
    pub difficulty: Difficulty,
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    coords: Coord2,
    view: CellView,
    disabled: bool,
    on_click: Callback<Coord2>,
    on_flag: Callback<Coord2>,
}

#[function_component(CellButton)]
fn cell_button(props: &CellProps) -> Html {
    let CellProps {
        coords,
        view,
        disabled,
        on_click,
        on_flag,
    } = props.clone();
    let (x, y) = coords;
    let shade = if (x ^ y) & 1 == 0 { "even" } else { "odd" };

    let class = classes!(
        "cell",
        shade,
        match view {
            CellView::Hidden => classes!("hidden"),
            CellView::Flagged => classes!("hidden", "flag"),
            CellView::Revealed(count) => classes!("open", format!("num-{}", count)),
            CellView::Mine { triggered: false } => classes!("open", "mine"),
            CellView::Mine { triggered: true } => classes!("open", "mine", "oops"),
        }
    );
    let content = match view {
        CellView::Hidden | CellView::Revealed(0) => html! {},
        CellView::Flagged => html! { "🚩" },
        CellView::Revealed(count) => html! { {count.to_string()} },
        CellView::Mine { .. } => html! { "💣" },
    };

    let onclick = Callback::from(move |_: MouseEvent| on_click.emit(coords));
    let oncontextmenu = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        on_flag.emit(coords);
    });

    html! {
        <td>
            <button {class} {disabled} {onclick} {oncontextmenu}>{content}</button>
        </td>
    }
}

/// Owns the session and the tick interval that drives its timer.
pub(crate) struct GameView {
    difficulty: Difficulty,
    fixed_seed: Option<u64>,
    session: Session,
    epoch: Epoch,
    mode: ClickMode,
    rules_open: bool,
    timer_interval: Option<Interval>,
}

impl GameView {
    fn next_seed(&self) -> u64 {
        match self.fixed_seed {
            Some(seed) => seed.wrapping_add(self.epoch.offset()),
            None => js_random_seed(),
        }
    }

    /// Cancels the pending tick before the old session goes away.
    fn restart(&mut self, difficulty: Difficulty) {
        self.timer_interval.take();
        self.epoch.advance();
        self.difficulty = difficulty;
        self.session = Session::new_game(difficulty, self.next_seed());
        log::debug!("restart: {:?}, {:?}", difficulty, self.epoch);
    }

    /// Keeps an interval alive exactly while the session timer runs.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        match (self.session.timer_running(), self.timer_interval.is_some()) {
            (true, false) => {
                log::debug!("timer started, {:?}", self.epoch);
                self.timer_interval = Some(Self::create_timer(ctx, self.epoch));
            }
            (false, true) => {
                log::debug!("timer stopped at {}s", self.session.elapsed_seconds());
                self.timer_interval = None;
            }
            _ => {}
        }
    }

    fn create_timer(ctx: &Context<Self>, epoch: Epoch) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MILLIS, move || link.send_message(Msg::Tick(epoch)))
    }

    fn apply(&mut self, ctx: &Context<Self>, coords: Coord2, mode: ClickMode) -> bool {
        let was_idle = self.session.state().is_idle();
        let updated = match self.session.click(coords, mode) {
            Ok(updated) => updated,
            Err(err) => {
                log::warn!("{:?} at {:?} rejected: {}", mode, coords, err);
                false
            }
        };
        self.sync_timer(ctx);
        // the first click may start the clock without changing any cell
        updated || (was_idle && !self.session.state().is_idle())
    }

    fn view_banner(&self) -> Html {
        let (class, text) = match self.session.state() {
            GameState::Won => ("banner win", "YOU WIN! 🎉"),
            GameState::Lost => ("banner lose", "GAME OVER! 💥"),
            GameState::Idle | GameState::Playing => return html! {},
        };
        html! { <div {class}>{text}</div> }
    }

    fn view_rules(&self, ctx: &Context<Self>) -> Html {
        let on_close = ctx.link().callback(|_: MouseEvent| Msg::ToggleRules);
        html! {
            <dialog class="rules" open={self.rules_open}>
                <article>
                    <header>
                        <h3>{"Minesweeper Rules"}</h3>
                        <button class="close" onclick={on_close}>{"×"}</button>
                    </header>
                    <ul>
                        { for RULES.iter().map(|rule| html! { <li>{*rule}</li> }) }
                    </ul>
                    <h4>{"Difficulty"}</h4>
                    <nav>
                        {
                            for Difficulty::ALL.into_iter().map(|difficulty| {
                                let class = classes!(
                                    "difficulty",
                                    (difficulty == self.difficulty).then_some("selected")
                                );
                                let onclick = ctx
                                    .link()
                                    .callback(move |_: MouseEvent| Msg::SetDifficulty(difficulty));
                                html! {
                                    <button {class} {onclick}>
                                        {difficulty.label()}
                                        <small>{format!("{} mines", difficulty.mine_count())}</small>
                                    </button>
                                }
                            })
                        }
                    </nav>
                </article>
            </dialog>
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let size: Coord = self.session.grid_size();
        let finished = self.session.is_finished();
        let on_click = ctx.link().callback(Msg::Cell);
        let on_flag = ctx.link().callback(Msg::CellAlt);

        html! {
            <table class="board">
                {
                    for (0..size).map(|y| html! {
                        <tr>
                            {
                                for (0..size).map(|x| {
                                    let coords = (x, y);
                                    let view = self.session.cell_view(coords).unwrap_or_default();
                                    let disabled = finished || view.is_revealed();
                                    html! {
                                        <CellButton
                                            {coords}
                                            {view}
                                            {disabled}
                                            on_click={on_click.clone()}
                                            on_flag={on_flag.clone()}
                                        />
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { difficulty, seed } = ctx.props().clone();
        Self {
            difficulty,
            fixed_seed: seed,
            session: Session::new_game(difficulty, seed.unwrap_or_else(js_random_seed)),
            epoch: Epoch::default(),
            mode: ClickMode::default(),
            rules_open: false,
            timer_interval: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        if let Some((coords, mode)) = msg.cell_click(self.mode) {
            log::debug!("click {:?} in {:?} mode", coords, mode);
            return self.apply(ctx, coords, mode);
        }

        match msg {
            Cell(_) | CellAlt(_) => false,
            ToggleFlagMode => {
                self.mode = self.mode.toggled();
                true
            }
            NewGame => {
                self.restart(self.difficulty);
                true
            }
            SetDifficulty(difficulty) => {
                self.rules_open = false;
                self.restart(difficulty);
                true
            }
            ToggleRules => {
                self.rules_open = !self.rules_open;
                true
            }
            Tick(epoch) if !self.epoch.accepts(epoch) => {
                log::trace!("dropping stale tick from {:?}", epoch);
                false
            }
            Tick(_) => {
                let updated = self.session.tick();
                self.sync_timer(ctx);
                updated
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let status = self.session.status();
        let flag_mode = matches!(self.mode, ClickMode::Flag);
        let cb_flag_mode = ctx.link().callback(|_: MouseEvent| Msg::ToggleFlagMode);
        let cb_new_game = ctx.link().callback(|_: MouseEvent| Msg::NewGame);
        let cb_rules = ctx.link().callback(|_: MouseEvent| Msg::ToggleRules);
        let flag_title = if flag_mode { "Flag Mode (active)" } else { "Flag Mode" };

        html! {
            <div class="minesweeper" oncontextmenu={Callback::from(|e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside class="mines">{"💣 "}{status.flags_remaining.to_string()}</aside>
                    <aside class="clock">{"⏱️ "}{status.clock()}</aside>
                    <button
                        class={classes!("flag-mode", flag_mode.then_some("active"))}
                        title={flag_title}
                        onclick={cb_flag_mode}
                    >
                        {"🚩"}
                    </button>
                    <button class="new-game" title="New Game" onclick={cb_new_game}>{"↻"}</button>
                    <button class="help" title="Rules & Difficulty" onclick={cb_rules}>{"?"}</button>
                </nav>
                <main>
                    { self.view_banner() }
                    { self.view_rules(ctx) }
                    { self.view_board(ctx) }
                </main>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_rejects_ticks_from_previous_epoch() {
        let mut epoch = Epoch::default();
        let scheduled = epoch;
        assert!(epoch.accepts(scheduled));

        epoch.advance();
        assert!(!epoch.accepts(scheduled));
        assert!(epoch.accepts(Epoch(1)));
        assert_eq!(epoch.offset(), 1);
    }

    #[test]
    fn epoch_wraps_without_matching_neighbours() {
        let mut epoch = Epoch(u32::MAX);
        epoch.advance();

        assert_eq!(epoch, Epoch(0));
        assert!(!epoch.accepts(Epoch(u32::MAX)));
    }

    #[test]
    fn right_click_always_flags() {
        for mode in [ClickMode::Reveal, ClickMode::Flag] {
            assert_eq!(Msg::Cell((1, 2)).cell_click(mode), Some(((1, 2), mode)));
            assert_eq!(
                Msg::CellAlt((3, 4)).cell_click(mode),
                Some(((3, 4), ClickMode::Flag))
            );
        }
        assert_eq!(Msg::NewGame.cell_click(ClickMode::Reveal), None);
        assert_eq!(Msg::Tick(Epoch(0)).cell_click(ClickMode::Flag), None);
    }
}
