//! Resolution of view configurations into concrete per-bin sizes and colors.
//!
//! Both resolvers follow the same contract: an absent configuration yields a
//! documented default, a constant applies to every element, and a data-driven
//! mapping produces one value per element of the requested [`ValuesWindow`].

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::color::Color;
use super::color_scale::ColorScale;
use super::view_config::{
    AssociatedValues, ColorConfig, ColorScaleSpec, ScaleConfig, Values, ViewConfig,
    DEFAULT_MARK_SIZE,
};
use crate::chromatin::{ColumnData, Table};
use crate::error::{ChromatinError, Result};

/// A resolved attribute: one value for everything, or one per element
#[derive(Debug, Clone, PartialEq)]
pub enum VisualAttribute<T> {
    Single(T),
    PerElement(Vec<T>),
}

impl<T: Copy> VisualAttribute<T> {
    /// Value for element `index`; `None` past the end of a per-element array
    pub fn get(&self, index: usize) -> Option<T> {
        match self {
            VisualAttribute::Single(value) => Some(*value),
            VisualAttribute::PerElement(values) => values.get(index).copied(),
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, VisualAttribute::Single(_))
    }
}

/// The slice `[offset, offset + length)` of a values array that one resolve
/// call consumes.
///
/// Multi-part models move the offset by each part's bin count so that every
/// part reads its own contiguous run of a single model-wide array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValuesWindow {
    pub offset: usize,
    pub length: usize,
}

impl ValuesWindow {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// The window following this one, `length` elements long
    pub fn advance(&self, length: usize) -> Self {
        Self::new(self.offset + self.length, length)
    }
}

/// First-seen assignment of categorical values to palette colors.
///
/// The memo is owned by the caller, which decides its lifetime: a single
/// model, or a whole scene so that a value colors identically everywhere.
#[derive(Debug, Clone, Default)]
pub struct CategoricalColorMemo {
    assigned: HashMap<String, Color>,
}

impl CategoricalColorMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, value: &str) -> Option<Color> {
        self.assigned.get(value).copied()
    }

    /// Color of `value`, assigning the next unused palette slot on first sight.
    /// Slots wrap around when there are more values than colors.
    pub fn color_for(&mut self, value: &str, palette: &[Color]) -> Color {
        if let Some(color) = self.get(value) {
            return color;
        }
        if palette.is_empty() {
            return default_color();
        }

        let color = palette[self.assigned.len() % palette.len()];
        self.assigned.insert(value.to_string(), color);
        color
    }

    /// Like [`CategoricalColorMemo::color_for`], but a new value takes the first
    /// palette color no other value holds yet. Wraps by slot once every color
    /// is taken.
    pub fn unused_color_for(&mut self, value: &str, palette: &[Color]) -> Color {
        if let Some(color) = self.get(value) {
            return color;
        }

        let unused = palette
            .iter()
            .find(|candidate| !self.assigned.values().any(|taken| taken == *candidate))
            .copied();
        match unused {
            Some(color) => {
                self.assigned.insert(value.to_string(), color);
                color
            }
            None => self.color_for(value, palette),
        }
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

/// The color used when nothing is configured (`DEFAULT_COLOR`)
pub fn default_color() -> Color {
    Color::from_rgb8(0x6a, 0x8e, 0xd0)
}

/// Linearly remap `value` from `[min, max]` onto `[y1, y2]`.
///
/// An empty domain (`min == max`) maps everything to `y1`.
pub fn linear_remap(value: f64, min: f64, max: f64, y1: f64, y2: f64) -> f64 {
    let span = max - min;
    if span == 0.0 {
        return y1;
    }
    (value - min) / span * (y2 - y1) + y1
}

/// Data values after resolving inline `values` versus a `field` reference
#[derive(Clone, Copy)]
enum DataValues<'a> {
    Quantitative(&'a [f64]),
    Categorical(&'a [String]),
}

impl DataValues<'_> {
    fn len(&self) -> usize {
        match self {
            DataValues::Quantitative(values) => values.len(),
            DataValues::Categorical(values) => values.len(),
        }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolve the mark size of every element in `window`.
///
/// `table` backs `field` references; it is required only when the
/// configuration names a column.
pub fn resolve_scale(
    view_config: &ViewConfig,
    table: Option<&Table>,
    window: ValuesWindow,
) -> Result<VisualAttribute<f32>> {
    let mapping = match &view_config.scale {
        None => return Ok(VisualAttribute::Single(DEFAULT_MARK_SIZE)),
        Some(ScaleConfig::Constant(size)) => return Ok(VisualAttribute::Single(*size)),
        Some(ScaleConfig::Mapped(mapping)) => mapping,
    };

    let Some(data) = lookup_values(&mapping.values, table)? else {
        return Ok(VisualAttribute::Single(DEFAULT_MARK_SIZE));
    };

    let (y1, y2) = (f64::from(mapping.scale_min), f64::from(mapping.scale_max));
    let sizes: Vec<Option<f32>> = match data {
        DataValues::Quantitative(values) => {
            let (min, max) = domain(&mapping.values, values);
            windowed(values, window)
                .map(|v| v.map(|v| linear_remap(*v, min, max, y1, y2) as f32))
                .collect()
        }
        DataValues::Categorical(values) => {
            let categories = distinct_in_order(values);
            let slots = categories.len();
            let sizes: HashMap<&str, f32> = categories
                .into_iter()
                .enumerate()
                .map(|(i, category)| {
                    let t = if slots > 1 {
                        i as f64 / (slots - 1) as f64
                    } else {
                        0.0
                    };
                    (category, (y1 + t * (y2 - y1)) as f32)
                })
                .collect();
            windowed(values, window)
                .map(|v| v.and_then(|v| sizes.get(v.as_str()).copied()))
                .collect()
        }
    };

    Ok(VisualAttribute::PerElement(fill_missing(
        sizes,
        DEFAULT_MARK_SIZE,
        data.len(),
        window,
    )))
}

/// Resolve the color of every element in `window`.
///
/// Categorical values are assigned palette slots through `memo`, so passing
/// the same memo to several calls keeps their categories consistent.
pub fn resolve_color(
    view_config: &ViewConfig,
    table: Option<&Table>,
    window: ValuesWindow,
    memo: &mut CategoricalColorMemo,
) -> Result<VisualAttribute<Color>> {
    let mapping = match &view_config.color {
        None => return Ok(VisualAttribute::Single(default_color())),
        Some(ColorConfig::Constant(color)) => {
            return Ok(VisualAttribute::Single(Color::parse(color)?))
        }
        Some(ColorConfig::Mapped(mapping)) => mapping,
    };

    let Some(data) = lookup_values(&mapping.values, table)? else {
        return Ok(VisualAttribute::Single(default_color()));
    };

    let colors: Vec<Option<Color>> = match data {
        DataValues::Quantitative(values) => {
            let scale = ramp_for(&mapping.color_scale)?;
            let (min, max) = domain(&mapping.values, values);
            windowed(values, window)
                .map(|v| v.map(|v| scale.map(*v, min, max)))
                .collect()
        }
        DataValues::Categorical(values) => match &mapping.color_scale {
            ColorScaleSpec::Palette(palette) => {
                let palette = parse_palette(palette)?;
                windowed(values, window)
                    .map(|v| v.map(|v| memo.color_for(v, &palette)))
                    .collect()
            }
            ColorScaleSpec::Named(name) => {
                // room for every category already memoized plus the new ones here
                let unseen = distinct_in_order(values)
                    .into_iter()
                    .filter(|v| memo.get(v).is_none())
                    .count();
                let palette = ColorScale::named_or_default(name).colors(memo.len() + unseen);
                windowed(values, window)
                    .map(|v| v.map(|v| memo.unused_color_for(v, &palette)))
                    .collect()
            }
        },
    };

    debug!(
        "resolved {} colors, {} categories memoized",
        colors.len(),
        memo.len()
    );
    Ok(VisualAttribute::PerElement(fill_missing(
        colors,
        default_color(),
        data.len(),
        window,
    )))
}

/// Inline values win over a `field` reference. `None` means "nothing to map",
/// which degrades to the default.
fn lookup_values<'a>(
    associated: &'a AssociatedValues,
    table: Option<&'a Table>,
) -> Result<Option<DataValues<'a>>> {
    let data = if let Some(values) = &associated.values {
        match values {
            Values::Quantitative(values) => DataValues::Quantitative(values),
            Values::Categorical(values) => DataValues::Categorical(values),
        }
    } else if let Some(field) = &associated.field {
        let column = table
            .and_then(|table| table.column(field))
            .ok_or_else(|| ChromatinError::MissingColumn(field.clone()))?;
        match column {
            ColumnData::Numeric(values) => DataValues::Quantitative(values),
            ColumnData::Text(values) => DataValues::Categorical(values),
        }
    } else {
        warn!("mapping has neither `values` nor `field`, using the default");
        return Ok(None);
    };

    if data.is_empty() {
        warn!("empty values array, using the default");
        return Ok(None);
    }
    Ok(Some(data))
}

/// Configured domain, each bound defaulting to the data's own extreme
fn domain(associated: &AssociatedValues, values: &[f64]) -> (f64, f64) {
    let min = associated
        .min
        .unwrap_or_else(|| values.iter().copied().fold(f64::INFINITY, f64::min));
    let max = associated
        .max
        .unwrap_or_else(|| values.iter().copied().fold(f64::NEG_INFINITY, f64::max));
    (min, max)
}

fn ramp_for(spec: &ColorScaleSpec) -> Result<ColorScale> {
    match spec {
        ColorScaleSpec::Named(name) => Ok(ColorScale::named_or_default(name)),
        ColorScaleSpec::Palette(palette) => ColorScale::from_css(palette),
    }
}

fn parse_palette(palette: &[String]) -> Result<Vec<Color>> {
    palette.iter().map(|c| Color::parse(c)).collect()
}

/// Elements of `values` inside `window`; `None` past the end of the array
fn windowed<T>(values: &[T], window: ValuesWindow) -> impl Iterator<Item = Option<&T>> {
    (window.offset..window.offset + window.length).map(move |i| values.get(i))
}

/// Distinct values in order of first appearance
fn distinct_in_order(values: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(String::as_str)
        .filter(|v| seen.insert(*v))
        .collect()
}

fn fill_missing<T: Copy>(
    resolved: Vec<Option<T>>,
    default: T,
    available: usize,
    window: ValuesWindow,
) -> Vec<T> {
    if window.offset + window.length > available {
        warn!(
            "values array has {} entries but elements {}..{} were requested, padding with the default",
            available,
            window.offset,
            window.offset + window.length
        );
    }
    resolved.into_iter().map(|v| v.unwrap_or(default)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::view_config::{ColorMapping, ScaleMapping, DEFAULT_COLOR};

    fn categorical_color(values: &[&str], palette: &[&str]) -> ViewConfig {
        ViewConfig::default().with_color(ColorConfig::Mapped(ColorMapping {
            values: AssociatedValues::inline(Values::Categorical(
                values.iter().map(|v| v.to_string()).collect(),
            )),
            color_scale: ColorScaleSpec::Palette(palette.iter().map(|c| c.to_string()).collect()),
        }))
    }

    fn scale_mapping(values: AssociatedValues, scale_min: f32, scale_max: f32) -> ViewConfig {
        ViewConfig::default().with_scale(ScaleConfig::Mapped(ScaleMapping {
            values,
            scale_min,
            scale_max,
        }))
    }

    fn per_element<T: Clone>(attribute: VisualAttribute<T>) -> Vec<T> {
        match attribute {
            VisualAttribute::PerElement(values) => values,
            VisualAttribute::Single(_) => panic!("expected per-element values"),
        }
    }

    #[test]
    fn test_absent_config_uses_defaults() {
        let config = ViewConfig::default();
        let window = ValuesWindow::new(0, 10);

        let size = resolve_scale(&config, None, window).unwrap();
        assert_eq!(size, VisualAttribute::Single(DEFAULT_MARK_SIZE));

        let color = resolve_color(&config, None, window, &mut CategoricalColorMemo::new()).unwrap();
        assert_eq!(color, VisualAttribute::Single(default_color()));
        assert_eq!(default_color().to_hex(), DEFAULT_COLOR);
    }

    #[test]
    fn test_constant_config_applies_everywhere() {
        let config = ViewConfig::default()
            .with_scale(ScaleConfig::Constant(0.05))
            .with_color(ColorConfig::Constant("red".to_string()));
        let window = ValuesWindow::new(0, 3);

        let size = resolve_scale(&config, None, window).unwrap();
        assert_eq!(size.get(2), Some(0.05));

        let color = resolve_color(&config, None, window, &mut CategoricalColorMemo::new()).unwrap();
        assert_eq!(color, VisualAttribute::Single(Color::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_invalid_constant_color_is_an_error() {
        let config = ViewConfig::default().with_color(ColorConfig::Constant("nope".to_string()));
        let result = resolve_color(
            &config,
            None,
            ValuesWindow::new(0, 1),
            &mut CategoricalColorMemo::new(),
        );
        assert!(matches!(result, Err(ChromatinError::InvalidColor(_))));
    }

    #[test]
    fn test_quantitative_scale_is_linear() {
        let values = AssociatedValues::inline(Values::Quantitative(vec![0.0, 50.0, 100.0]))
            .with_domain(0.0, 100.0);
        let config = scale_mapping(values, 1.0, 5.0);

        let sizes = per_element(resolve_scale(&config, None, ValuesWindow::new(0, 3)).unwrap());
        assert_eq!(sizes, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_quantitative_domain_defaults_to_data_extremes() {
        let values = AssociatedValues::inline(Values::Quantitative(vec![10.0, 20.0, 30.0]));
        let config = scale_mapping(values, 0.0, 1.0);

        let sizes = per_element(resolve_scale(&config, None, ValuesWindow::new(0, 3)).unwrap());
        assert_eq!(sizes, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_equal_domain_does_not_divide_by_zero() {
        assert_eq!(linear_remap(7.0, 3.0, 3.0, 1.0, 5.0), 1.0);
    }

    #[test]
    fn test_categorical_scale_spaces_sizes_by_first_appearance() {
        let values = AssociatedValues::inline(Values::Categorical(
            ["b", "a", "b", "c"].iter().map(|v| v.to_string()).collect(),
        ));
        let config = scale_mapping(values, 1.0, 3.0);

        let sizes = per_element(resolve_scale(&config, None, ValuesWindow::new(0, 4)).unwrap());
        assert_eq!(sizes, vec![1.0, 2.0, 1.0, 3.0]);
    }

    #[test]
    fn test_categorical_colors_reuse_first_assignment() {
        let config = categorical_color(&["a", "b", "a", "c"], &["#ff0000", "#00ff00", "#0000ff"]);
        let window = ValuesWindow::new(0, 4);

        let first = per_element(
            resolve_color(&config, None, window, &mut CategoricalColorMemo::new()).unwrap(),
        );
        assert_eq!(first[0], first[2]);
        assert_eq!(first[0], Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(first[1], Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(first[3], Color::rgb(0.0, 0.0, 1.0));

        // a fresh memo reproduces the same assignment
        let second = per_element(
            resolve_color(&config, None, window, &mut CategoricalColorMemo::new()).unwrap(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_palette_slots_wrap_around() {
        let config = categorical_color(&["a", "b", "c"], &["#ff0000", "#00ff00"]);
        let colors = per_element(
            resolve_color(
                &config,
                None,
                ValuesWindow::new(0, 3),
                &mut CategoricalColorMemo::new(),
            )
            .unwrap(),
        );
        assert_eq!(colors[2], colors[0]);
    }

    #[test]
    fn test_shared_memo_spans_windows() {
        let config = categorical_color(&["x", "y", "y", "x"], &["#ff0000", "#00ff00"]);
        let mut memo = CategoricalColorMemo::new();

        let first = ValuesWindow::new(0, 2);
        let head = per_element(resolve_color(&config, None, first, &mut memo).unwrap());
        let tail =
            per_element(resolve_color(&config, None, first.advance(2), &mut memo).unwrap());

        assert_eq!(head, vec![Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 1.0, 0.0)]);
        assert_eq!(tail, vec![Color::rgb(0.0, 1.0, 0.0), Color::rgb(1.0, 0.0, 0.0)]);
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn test_named_scale_generates_one_color_per_category() {
        let config = ViewConfig::default().with_color(ColorConfig::Mapped(ColorMapping {
            values: AssociatedValues::inline(Values::Categorical(
                ["p", "q", "p"].iter().map(|v| v.to_string()).collect(),
            )),
            color_scale: ColorScaleSpec::Named("greys".to_string()),
        }));

        let colors = per_element(
            resolve_color(
                &config,
                None,
                ValuesWindow::new(0, 3),
                &mut CategoricalColorMemo::new(),
            )
            .unwrap(),
        );
        assert_eq!(colors[0], Color::WHITE);
        assert_eq!(colors[1], Color::BLACK);
    }

    #[test]
    fn test_named_scale_skips_colors_taken_by_earlier_categories() {
        let greys = |values: &[&str]| {
            ViewConfig::default().with_color(ColorConfig::Mapped(ColorMapping {
                values: AssociatedValues::inline(Values::Categorical(
                    values.iter().map(|v| v.to_string()).collect(),
                )),
                color_scale: ColorScaleSpec::Named("greys".to_string()),
            }))
        };
        let mut memo = CategoricalColorMemo::new();
        let window = ValuesWindow::new(0, 2);

        let first = per_element(resolve_color(&greys(&["a", "b"]), None, window, &mut memo).unwrap());
        let second =
            per_element(resolve_color(&greys(&["c", "d"]), None, window, &mut memo).unwrap());

        let all = [first[0], first[1], second[0], second[1]];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(memo.len(), 4);
    }

    #[test]
    fn test_quantitative_color_follows_ramp() {
        let config = ViewConfig::default().with_color(ColorConfig::Mapped(ColorMapping {
            values: AssociatedValues::inline(Values::Quantitative(vec![0.0, 1.0])),
            color_scale: ColorScaleSpec::Palette(vec!["black".to_string(), "white".to_string()]),
        }));

        let colors = per_element(
            resolve_color(
                &config,
                None,
                ValuesWindow::new(0, 2),
                &mut CategoricalColorMemo::new(),
            )
            .unwrap(),
        );
        assert_eq!(colors, vec![Color::BLACK, Color::WHITE]);
    }

    #[test]
    fn test_empty_values_degrade_to_default() {
        let config = scale_mapping(AssociatedValues::inline(Values::Quantitative(vec![])), 1.0, 2.0);
        let size = resolve_scale(&config, None, ValuesWindow::new(0, 5)).unwrap();
        assert_eq!(size, VisualAttribute::Single(DEFAULT_MARK_SIZE));
    }

    #[test]
    fn test_elements_past_the_values_get_default() {
        let values = AssociatedValues::inline(Values::Quantitative(vec![0.0, 10.0]));
        let config = scale_mapping(values, 1.0, 2.0);

        let sizes = per_element(resolve_scale(&config, None, ValuesWindow::new(1, 3)).unwrap());
        assert_eq!(sizes, vec![2.0, DEFAULT_MARK_SIZE, DEFAULT_MARK_SIZE]);
    }

    #[test]
    fn test_field_reads_table_column() {
        let table = Table::new()
            .with_column("signal", ColumnData::Numeric(vec![0.0, 2.0, 4.0]))
            .unwrap();
        let config = scale_mapping(AssociatedValues::field("signal"), 0.0, 1.0);

        let sizes =
            per_element(resolve_scale(&config, Some(&table), ValuesWindow::new(0, 3)).unwrap());
        assert_eq!(sizes, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let table = Table::new();
        let config = scale_mapping(AssociatedValues::field("signal"), 0.0, 1.0);

        for table in [Some(&table), None] {
            let result = resolve_scale(&config, table, ValuesWindow::new(0, 1));
            assert!(matches!(result, Err(ChromatinError::MissingColumn(ref name)) if name == "signal"));
        }
    }

    #[test]
    fn test_inline_values_win_over_field() {
        let mut values = AssociatedValues::inline(Values::Quantitative(vec![5.0, 5.0]));
        values.field = Some("absent".to_string());
        let config = scale_mapping(values, 2.0, 4.0);

        let sizes = per_element(resolve_scale(&config, None, ValuesWindow::new(0, 2)).unwrap());
        assert_eq!(sizes, vec![2.0, 2.0]);
    }
}
