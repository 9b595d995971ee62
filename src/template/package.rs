//! The parcel label template for shipping packages.

use super::{Align, Field, LabelTemplate};
use crate::entity::{LabelEntity, Package};
use crate::layout::{Columns, Edges, GridSpec, Span};

fn pkg(
    f: impl Fn(&Package) -> String + Send + Sync + 'static,
) -> impl Fn(&LabelEntity) -> String + Send + Sync + 'static {
    move |e| e.package().map(&f).unwrap_or_default()
}

/// Parcel label, 101.6 × 152.4 mm (4 × 6 in). Folio and barcode at the
/// top, recipient block in the middle, shipment metadata and the running
/// "part i / n" at the bottom. Multi-part shipments get one label per
/// part, stamped by the dispatcher.
pub fn package_4x6() -> LabelTemplate {
    let grid = GridSpec {
        width_mm: 101.6,
        height_mm: 152.4,
        columns: Columns::Count(2),
        row_heights_mm: vec![12.0, 30.0, 10.0, 18.0, 10.0, 10.0, 10.0, 12.0],
        column_gap_mm: 1.0,
        row_gap_mm: 1.0,
        padding: Edges::uniform(3.0),
    };
    LabelTemplate::new(
        "package-4x6",
        "Package (101.6×152.4)",
        grid,
        vec![
            Field::text("folio", Span::new(1, 1, 2, 3), 6.0, pkg(|p| p.folio.clone()))
                .align(Align::Center)
                .bold(),
            Field::barcode("folio-barcode", Span::new(2, 1, 3, 3), |e| {
                e.barcode_payload().to_string()
            }),
            Field::text("recipient", Span::new(3, 1, 4, 3), 4.5, pkg(|p| p.recipient.clone())),
            Field::text("address", Span::new(4, 1, 5, 3), 3.2, pkg(|p| p.address.clone()))
                .lines(3),
            Field::text("city", Span::new(5, 1, 6, 2), 3.2, pkg(|p| p.city.clone())),
            Field::text("postal", Span::new(5, 2, 6, 3), 3.2, pkg(|p| p.postal_code.clone()))
                .align(Align::Right),
            Field::text("branch", Span::new(6, 1, 7, 2), 3.0, pkg(|p| p.branch.clone())),
            Field::text("date", Span::new(6, 2, 7, 3), 3.0, pkg(|p| p.date.clone()))
                .align(Align::Right),
            Field::text(
                "weight",
                Span::new(7, 1, 8, 3),
                3.0,
                pkg(|p| p.weight_kg.map(|w| format!("PESO {w:.2} kg")).unwrap_or_default()),
            ),
            Field::text(
                "part",
                Span::new(8, 1, 9, 3),
                4.5,
                pkg(|p| format!("{} / {}", p.part_index, p.part_count)),
            )
            .align(Align::Center)
            .bold(),
        ],
    )
}
