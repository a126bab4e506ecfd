use crate::dashboard::{Dashboard, ViewUpdate};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::{FilterSelection, PriceRange, Selector};
use crate::table::{SortKey, COLUMN_COUNT};

/// Number of key presses to sweep a bound across the whole price domain.
const PRICE_STEPS: f64 = 20.0;

/// Interactive selection state for the terminal dashboard, holding the view
/// of the current selection.
pub struct Controls<'a> {
    dashboard: &'a Dashboard<'a>,
    pub selection: FilterSelection,
    pub sort: Option<SortKey>,
    pub view: ViewUpdate<'a>,
}

pub trait SelectionApplier<'a>: Sized {
    fn new(dashboard: &'a Dashboard<'a>, selection: FilterSelection) -> Result<Self>;
    fn cycle_borough(&mut self, forward: bool) -> Result<()>;
    fn cycle_room_type(&mut self, forward: bool) -> Result<()>;
    fn shift_low(&mut self, up: bool) -> Result<()>;
    fn shift_high(&mut self, up: bool) -> Result<()>;
    fn cycle_sort_column(&mut self);
    fn toggle_sort_direction(&mut self);
    fn refresh_data(&mut self) -> Result<()>;
}

fn cycle(options: &[Selector], current: &Selector, forward: bool) -> Selector {
    let position = options.iter().position(|o| o == current).unwrap_or(0);
    let next = if forward {
        (position + 1) % options.len()
    } else {
        (position + options.len() - 1) % options.len()
    };
    options[next].clone()
}

impl<'a> Controls<'a> {
    pub fn dataset(&self) -> &'a Dataset {
        self.dashboard.dataset()
    }

    fn borough_options(&self) -> Vec<Selector> {
        let boroughs = self.dashboard.index().boroughs();
        std::iter::once(Selector::All)
            .chain(boroughs.iter().map(|b| Selector::Only(b.to_string())))
            .collect()
    }

    fn room_type_options(&self) -> Vec<Selector> {
        let room_types = self.dashboard.dataset().room_types();
        std::iter::once(Selector::All)
            .chain(room_types.iter().map(|r| Selector::Only(r.clone())))
            .collect()
    }

    fn price_step(&self) -> f64 {
        let domain = self.dashboard.dataset().price_domain();
        ((domain.high() - domain.low()) / PRICE_STEPS).round().max(1.0)
    }

    fn apply_sort(&mut self) {
        if let Some(key) = self.sort {
            self.view.table.sort_by(&[key]);
        }
    }
}

impl<'a> SelectionApplier<'a> for Controls<'a> {
    fn new(dashboard: &'a Dashboard<'a>, selection: FilterSelection) -> Result<Self> {
        let view = dashboard.update(&selection)?;
        Ok(Controls {
            dashboard,
            selection,
            sort: None,
            view,
        })
    }

    fn cycle_borough(&mut self, forward: bool) -> Result<()> {
        self.selection.borough = cycle(&self.borough_options(), &self.selection.borough, forward);
        self.refresh_data()
    }

    fn cycle_room_type(&mut self, forward: bool) -> Result<()> {
        self.selection.room_type = cycle(&self.room_type_options(), &self.selection.room_type, forward);
        self.refresh_data()
    }

    fn shift_low(&mut self, up: bool) -> Result<()> {
        let domain = self.dashboard.dataset().price_domain();
        let range = self.selection.price_range;
        let low = if up {
            (range.low() + self.price_step()).min(range.high())
        } else {
            (range.low() - self.price_step()).max(domain.low())
        };
        self.selection.price_range = PriceRange::new(low, range.high())?;
        self.refresh_data()
    }

    fn shift_high(&mut self, up: bool) -> Result<()> {
        let domain = self.dashboard.dataset().price_domain();
        let range = self.selection.price_range;
        let high = if up {
            (range.high() + self.price_step()).min(domain.high())
        } else {
            (range.high() - self.price_step()).max(range.low())
        };
        self.selection.price_range = PriceRange::new(range.low(), high)?;
        self.refresh_data()
    }

    fn cycle_sort_column(&mut self) {
        self.sort = match self.sort {
            None => Some(SortKey {
                column: 0,
                descending: false,
            }),
            Some(key) if key.column + 1 < COLUMN_COUNT => Some(SortKey {
                column: key.column + 1,
                ..key
            }),
            Some(_) => None,
        };
        self.apply_sort();
    }

    fn toggle_sort_direction(&mut self) {
        if let Some(key) = self.sort.as_mut() {
            key.descending = !key.descending;
        }
        self.apply_sort();
    }

    fn refresh_data(&mut self) -> Result<()> {
        self.view = self.dashboard.update(&self.selection)?;
        self.apply_sort();
        Ok(())
    }
}
