#![no_main]

use arbitrary::{Arbitrary, Unstructured};

use libfuzzer_sys::fuzz_target;
use papercut::{CutSettings, Point, Sheet, SheetShape};

#[derive(Arbitrary, Debug)]
enum Op {
    Drag { from: (i16, i16), to: (i16, i16) },
    Hover { from: (i16, i16), to: (i16, i16) },
    PickScraps { at: (i16, i16) },
    FilterScraps,
    SortPieces,
    Rotate { eighths: u8 },
    FlipX,
    FlipY,
    ToggleManual,
    Restore,
}

fn point((x, y): (i16, i16)) -> Point {
    // Quarter-unit resolution, so that exact alignments are common.
    Point::new(x as f64 / 4.0, y as f64 / 4.0)
}

impl Op {
    fn apply(&self, sheet: &mut Sheet) {
        match self {
            Op::Drag { from, to } => {
                sheet.cut(point(*from), point(*to)).unwrap();
            }
            Op::Hover { from, to } => sheet.update(point(*from), point(*to)),
            Op::PickScraps { at } => sheet.update_scrap_candidates(&point(*at)),
            Op::FilterScraps => sheet.filter_scraps(),
            Op::SortPieces => sheet.sort_pieces(),
            Op::Rotate { eighths } => {
                sheet.rotate(*eighths as f64 * std::f64::consts::FRAC_PI_4);
            }
            Op::FlipX => sheet.flip_x(),
            Op::FlipY => sheet.flip_y(),
            Op::ToggleManual => {
                let settings = sheet.settings().clone();
                let manual = !settings.manual_scrap_selection();
                sheet.set_settings(settings.with_manual_scrap_selection(manual));
            }
            Op::Restore => *sheet = Sheet::from_snapshot(sheet.snapshot()),
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(ops) = Vec::<Op>::arbitrary(&mut u) else {
        return;
    };
    let shape = SheetShape::Rectangle {
        center: Point::new(0.0, 0.0),
        width: 4000.0,
        height: 3000.0,
    };
    let mut sheet = Sheet::new(shape, CutSettings::default());
    for op in &ops {
        op.apply(&mut sheet);
    }
});
