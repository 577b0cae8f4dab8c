#![doc = r#"
Hero record store contracts, the in-memory backend, and the `HeroService` client.

Operation mapping:

| `HeroService` method | `HeroStore` method | Collection request | Success message |
| --- | --- | --- | --- |
| `heroes` | `list_heroes` | `GET <collection>` | `fetched heroes` |
| `find_hero` | `find_hero` | `GET <collection>/?id=<id>` | `fetched hero id=<id>` / `did not find hero id=<id>` |
| `hero` | `get_hero` | `GET <collection>/<id>` | `fetched hero id=<id>` / `did not find hero id=<id>` |
| `search_heroes` | `search_heroes` | `GET <collection>/?name=<term>` | `found heroes matching "<term>"` |
| `add_hero` | `add_hero` | `POST <collection>` | `added hero w/ id=<id>` |
| `update_hero` | `update_hero` | `PUT <collection>` | `updated hero id=<id>` |
| `delete_hero` | `delete_hero` | `DELETE <collection>/<id>` | `deleted hero id=<id>` |

Implementation notes:
- "Not found" is `Ok(None)` for both lookups, whichever route they take.
- Blank search terms never reach the store.
- Failures are reported as `<operation> failed: <error>` and returned to the caller unchanged.
"#]

pub mod memory;
pub mod messages;
pub mod service;
pub mod store;
pub mod types;

pub use memory::MemoryHeroStore;
pub use messages::{MessageService, MessageSink};
pub use service::HeroService;
pub use store::{HeroStore, HeroStoreError, HeroStoreResult};
pub use types::{FIRST_HERO_ID, Hero, HeroId, HeroKey, NewHero, fixture_heroes, next_hero_id};
