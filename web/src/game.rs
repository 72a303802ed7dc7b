use memory_match_core::{
    BestResult, Card, Entropy, Fired, Game, GameConfig, PersistentBest, Snapshot, format_time,
};
use yew::prelude::*;

use crate::scheduler::TimerScheduler;
use crate::storage::BrowserStorage;
use crate::utils::browser_entropy;

type BrowserGame = Game<TimerScheduler, PersistentBest<BrowserStorage>>;

pub(crate) enum Msg {
    Flip(usize),
    Fire(Fired),
    Tick,
    Restart,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: usize,
    card: Card,
    #[prop_or_default]
    locked: bool,
    callback: Callback<usize>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        card,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        card.is_flipped.then_some("flip"),
        card.is_shaking.then_some("shake"),
        card.is_matched.then_some("matched"),
    );
    let disabled = locked || !card.is_selectable();
    let label = if card.is_flipped {
        format!("Card {}, showing {}", index + 1, card.value)
    } else {
        format!("Card {}, face down", index + 1)
    };

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    html! {
        <li>
            <button type="button" {class} {onclick} {disabled} aria-label={label}>
                <span class="view front-view">{"?"}</span>
                <span class="view back-view">{card.value.to_string()}</span>
            </button>
        </li>
    }
}

fn metric(label: &'static str, value: String) -> Html {
    html! {
        <div class="metric">
            <span class="metric-label">{label}</span>
            <span class="metric-value">{value}</span>
        </div>
    }
}

fn format_accuracy(accuracy: Option<u32>) -> String {
    accuracy.map_or_else(|| "—".to_string(), |accuracy| format!("{}%", accuracy))
}

fn format_best(best: Option<BestResult>) -> String {
    best.map_or_else(
        || "—".to_string(),
        |best| format!("{} moves / {}", best.moves, format_time(best.seconds)),
    )
}

/// Closest to square, wider rather than taller.
fn grid_columns(cards: usize) -> usize {
    (1..=cards).find(|columns| columns * columns >= cards).unwrap_or(1)
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub(crate) config: GameConfig,
    #[prop_or_default]
    pub(crate) seed: Option<u64>,
}

pub(crate) struct GameView {
    game: BrowserGame,
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { config, seed } = ctx.props().clone();
        let scheduler = TimerScheduler::new(
            ctx.link().callback(Msg::Fire),
            ctx.link().callback(|()| Msg::Tick),
        );
        let entropy = match seed {
            Some(seed) => {
                log::debug!("dealing from fixed seed {}", seed);
                Entropy::from_seed(seed)
            }
            None => browser_entropy(),
        };
        let store = PersistentBest::new(BrowserStorage::local());

        Self {
            game: Game::new(config, scheduler, store, entropy),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(index) => self.game.flip(index).has_update(),
            Fire(fired) => self.game.fire(fired).has_update(),
            Tick => self.game.tick().has_update(),
            Restart => {
                log::debug!("restart requested");
                self.game.reset_game();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Snapshot {
            cards,
            moves,
            seconds,
            best,
            status,
            is_new_record,
            is_processing,
            matched_pairs,
            total_pairs,
            progress_percent,
            accuracy,
            message,
        } = self.game.snapshot();

        let columns = grid_columns(cards.len());
        let cb_restart = ctx.link().callback(|_: MouseEvent| Msg::Restart);
        let class = classes!(
            "memory-match",
            status.is_complete().then_some("complete"),
            is_new_record.then_some("record"),
        );

        html! {
            <div {class}>
                <section class="metrics">
                    { metric("Moves", moves.to_string()) }
                    { metric("Time", format_time(seconds)) }
                    { metric("Pairs", format!("{} / {}", matched_pairs, total_pairs)) }
                    { metric("Accuracy", format_accuracy(accuracy)) }
                    { metric("Best", format_best(best)) }
                </section>
                <p class="status" aria-live="polite">{message}</p>
                <div class="progress" role="progressbar" aria-valuemin="0" aria-valuemax="100"
                    aria-valuenow={progress_percent.to_string()}>
                    <div class="progress-bar" style={format!("width: {}%", progress_percent)}/>
                </div>
                <ul class="cards" style={format!("--columns: {}", columns)}>
                    {
                        for cards.into_iter().enumerate().map(|(index, card)| {
                            let callback = ctx.link().callback(Msg::Flip);
                            let key = card.id.to_string();
                            html! {
                                <CardView key={key} {index} {card} {callback} locked={is_processing}/>
                            }
                        })
                    }
                </ul>
                <button type="button" class="restart" onclick={cb_restart}>{"Restart"}</button>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.game.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_close_to_square() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(2), 2);
        assert_eq!(grid_columns(12), 4);
        assert_eq!(grid_columns(16), 4);
        assert_eq!(grid_columns(20), 5);
    }

    #[test]
    fn best_reads_moves_then_time() {
        assert_eq!(format_best(None), "—");
        assert_eq!(format_best(Some(BestResult::new(12, 83))), "12 moves / 1:23");
    }

    #[test]
    fn accuracy_is_blank_before_the_first_move() {
        assert_eq!(format_accuracy(None), "—");
        assert_eq!(format_accuracy(Some(67)), "67%");
    }
}
