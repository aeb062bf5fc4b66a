#![doc = r#"
regionpro: batch region proposals for object-detection pipelines.

For every image listed in a manifest, regionpro rescales the image into a
600x450 envelope, asks a region proposer for candidate rectangles, keeps the
candidates that pass a minimum-size filter (in proposer order, capped at N)
and writes them out as text, optionally together with one JPEG crop per kept
region. Images are processed in parallel on a bounded worker pool; a broken
image or a failed write only affects its own entry.

Output dialects
---------------
Both dialects start with the same three lines:

```text
Image size: 600,300
1534ms
x1,y1,x2,y2
```

- `OutputDialect::Coordinates` then lists one `x1,y1,x2,y2` line per region.
- `OutputDialect::Crops` lists `id<TAB>id#rank<TAB>x1,y1,x2,y2<TAB>crop path`
  and writes `<output>/<id>#<rank>.jpg` for each region.

Quick start: run a manifest
---------------------------
```rust,no_run
use regionpro::{run_batch, ProcessingParams, RunConfig, SegmentProposer, SearchMode};

fn main() -> regionpro::Result<()> {
    let config = RunConfig::new("/data/images.txt", "/out/regions")
        .with_base_image_dir("/data/images")
        .with_params(ProcessingParams {
            number_regions: 50,
            mode: SearchMode::Fast,
            ..Default::default()
        });

    let report = run_batch(&config, &SegmentProposer::new())?;
    println!("processed={} skipped={} failed={}", report.processed, report.skipped, report.failed);
    Ok(())
}
```

Plugging in another proposer
----------------------------
```rust
use image::RgbImage;
use regionpro::{RegionProposer, Rect, SearchMode};

struct WholeImage;

impl RegionProposer for WholeImage {
    fn propose(&self, image: &RgbImage, _mode: SearchMode) -> regionpro::Result<Vec<Rect>> {
        Ok(vec![Rect::new(0, 0, image.width(), image.height())])
    }
}
```

Building blocks
---------------
```rust
use regionpro::{calculate_envelope_dimensions, select_regions, Rect, SelectionParams, SizeCriterion};

assert_eq!(calculate_envelope_dimensions(800, 400), (600, 300));

let params = SelectionParams { number_regions: 2, min_fraction: 0.2, criterion: SizeCriterion::Area };
let kept = select_regions(&[Rect::new(0, 0, 10, 10), Rect::new(0, 0, 300, 120)], 600, 300, &params);
assert_eq!(kept.len(), 1);
assert_eq!(kept[0].rank, 1);
```

Useful modules
--------------
- [`api`]: batch entry points and `BatchReport`.
- [`core`]: parameters, envelope resize, selection, per-entry pipeline.
- [`proposal`]: the `RegionProposer` trait, the built-in `SegmentProposer` and,
  with the `opencv` feature, `SelectiveSearchProposer`.
- [`io`]: manifest parsing, output paths and dialect writers.
- [`error`]: crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod proposal;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::{ProcessingParams, RunConfig, SelectionParams};
pub use error::{Error, Result};
pub use types::{OutputDialect, RankedRegion, Rect, SearchMode, SizeCriterion};

// Building blocks
pub use crate::core::processing::pipeline::{EntryOutcome, load_image, process_entry};
pub use crate::core::processing::resize::{calculate_envelope_dimensions, normalize_image};
pub use crate::core::processing::select::{passes_size_filter, select_regions};
pub use io::manifest::{ManifestEntry, read_manifest};
pub use proposal::{RegionProposer, SegmentProposer, default_proposer};
#[cfg(feature = "opencv")]
pub use proposal::SelectiveSearchProposer;

// High-level API re-exports
pub use api::{BatchReport, prepare_output_dir, process_entries, run_batch};
