// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use clap::Subcommand;

use flashcard_buddy_core::error::Fallible;
use flashcard_buddy_core::storage::Storage;
use flashcard_buddy_core::store::CardStore;
use flashcard_buddy_core::store::DEFAULT_TOGGLE_DELAY_MS;
use flashcard_buddy_core::store::StoreConfig;

use crate::cmd::cards::add_card;
use crate::cmd::cards::clear_cards;
use crate::cmd::cards::delete_card;
use crate::cmd::cards::edit_card;
use crate::cmd::list::ListOptions;
use crate::cmd::list::render_list;
use crate::cmd::list::render_tags;
use crate::cmd::reveal::reveal_card;
use crate::collection::open_collection;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the collection directory. By default, the current working directory is used.
    #[arg(long, global = true)]
    directory: Option<String>,
    /// How long revealing an answer takes, in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TOGGLE_DELAY_MS)]
    toggle_delay_ms: u32,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a card.
    Add {
        /// The question side.
        front: String,
        /// The answer side.
        back: String,
        /// Comma-separated tags, e.g. "HTML, Web".
        #[arg(long)]
        tags: Option<String>,
    },
    /// Edit a card. Omitted fields are left unchanged.
    Edit {
        /// The card id, or an unambiguous prefix of it.
        id: String,
        #[arg(long)]
        front: Option<String>,
        #[arg(long)]
        back: Option<String>,
        /// Comma-separated tags. Pass an empty string to remove all tags.
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a card.
    Delete {
        /// The card id, or an unambiguous prefix of it.
        id: String,
    },
    /// Delete every card in the collection.
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Show a card's answer.
    Reveal {
        /// The card id, or an unambiguous prefix of it.
        id: String,
    },
    /// List cards.
    List {
        /// Only show cards with this tag. Can be repeated.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Require every given tag instead of any of them.
        #[arg(long)]
        all: bool,
        /// Only show cards whose front or back contains this text.
        #[arg(long)]
        search: Option<String>,
        /// Print the answers too.
        #[arg(long)]
        answers: bool,
    },
    /// List tags with their card counts.
    Tags {
        /// Only show tags containing this text.
        #[arg(long)]
        search: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli = Cli::parse();
    let config = StoreConfig {
        toggle_delay_ms: cli.toggle_delay_ms,
    };
    let mut store = open_collection(cli.directory, config)?;
    let result = run(&mut store, cli.command).await;
    print_warnings(&mut store);
    result
}

async fn run<S: Storage>(store: &mut CardStore<S>, command: Command) -> Fallible<()> {
    match command {
        Command::Add { front, back, tags } => {
            let id = add_card(store, &front, &back, tags.as_deref())?;
            println!("Added card {id}.");
        }
        Command::Edit {
            id,
            front,
            back,
            tags,
        } => {
            if edit_card(
                store,
                &id,
                front.as_deref(),
                back.as_deref(),
                tags.as_deref(),
            )? {
                println!("Card updated.");
            } else {
                not_found(&id);
            }
        }
        Command::Delete { id } => {
            if delete_card(store, &id)? {
                println!("Card deleted.");
            } else {
                not_found(&id);
            }
        }
        Command::Clear { yes } => {
            let count = clear_cards(store, yes)?;
            println!("Deleted {count} cards.");
        }
        Command::Reveal { id } => match reveal_card(store, &id).await? {
            Some(out) => print!("{out}"),
            None => not_found(&id),
        },
        Command::List {
            tags,
            all,
            search,
            answers,
        } => {
            let options = ListOptions {
                tags,
                match_all: all,
                search,
                answers,
            };
            print!("{}", render_list(store, &options));
        }
        Command::Tags { search } => {
            print!("{}", render_tags(store, search.as_deref()));
        }
    }
    Ok(())
}

fn not_found(id: &str) {
    eprintln!("No card with id '{id}'.");
}

fn print_warnings<S: Storage>(store: &mut CardStore<S>) {
    for warning in store.take_warnings() {
        eprintln!("warning: {warning}");
    }
}
