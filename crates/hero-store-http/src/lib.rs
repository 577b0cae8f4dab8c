#![doc = r#"
HTTP-backed `HeroStore` over a REST-style collection.

Operation mapping:

| `HeroStore` method | Request | Notes |
| --- | --- | --- |
| `list_heroes` | `GET <collection>` | |
| `find_hero` | `GET <collection>/?id=<id>` | first of a zero-or-one element array |
| `get_hero` | `GET <collection>/<id>` | `404` is `Ok(None)` |
| `search_heroes` | `GET <collection>/?name=<term>` | term is URL-encoded by the transport |
| `add_hero` | `POST <collection>` | JSON body without `id`; response carries the assigned id |
| `update_hero` | `PUT <collection>` | JSON body with `id` |
| `delete_hero` | `DELETE <collection>/<id>` | sends `Content-Type: application/json` |

Implementation notes:
- The collection defaults to `api/heroes` on `http://127.0.0.1:8080`; see `HeroApiConfig::from_env`.
- Non-2xx statuses map to `HeroStoreError`: `404` to `NotFound`, `400`/`422` to `InvalidInput`,
  anything else to `Backend`. Network errors are `Transport`.
- `testing::MockHeroApi` serves the same routes in-process for tests.
"#]

pub mod adapter;
pub mod testing;
pub mod transport;

pub use adapter::{
    DEFAULT_HEROES_API_BASE_URL, DEFAULT_HEROES_COLLECTION, HeroApiConfig, HttpHeroStore,
};
pub use testing::MockHeroApi;
pub use transport::{
    ApiRequest, ApiResponse, HeroApiTransport, JSON_CONTENT_TYPE, ReqwestTransport,
};
