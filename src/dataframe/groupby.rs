//! Group-by: split a frame by key columns, aggregate each group, reassemble
//!
//! Grouping scans the frame once and keeps groups in first-seen key order,
//! each with its row positions in input order.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::config::FrameConfig;
use crate::core::{DType, Value};
use crate::dataframe::aggregations;
use crate::dataframe::base::{check_unique_columns, DataFrame};
use crate::dataframe::key::CompositeKey;
use crate::dataframe::naming::ColumnNamer;
use crate::error::{Error, Result};

/// Aggregation or cumulative transform applied per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggFunc {
    Sum,
    Mean,
    Count,
    Std,
    Var,
    Median,
    Mode,
    Min,
    Max,
    CumSum,
    CumMin,
    CumMax,
    CumProd,
}

impl AggFunc {
    pub fn name(&self) -> &'static str {
        match self {
            AggFunc::Sum => "sum",
            AggFunc::Mean => "mean",
            AggFunc::Count => "count",
            AggFunc::Std => "std",
            AggFunc::Var => "var",
            AggFunc::Median => "median",
            AggFunc::Mode => "mode",
            AggFunc::Min => "min",
            AggFunc::Max => "max",
            AggFunc::CumSum => "cumsum",
            AggFunc::CumMin => "cummin",
            AggFunc::CumMax => "cummax",
            AggFunc::CumProd => "cumprod",
        }
    }

    /// Cumulative ops emit one value per input row instead of one per group
    pub fn is_cumulative(&self) -> bool {
        matches!(
            self,
            AggFunc::CumSum | AggFunc::CumMin | AggFunc::CumMax | AggFunc::CumProd
        )
    }

    fn apply(&self, values: &[Value], integral: bool) -> Vec<Value> {
        match self {
            AggFunc::Sum => vec![aggregations::sum(values, integral)],
            AggFunc::Mean => vec![aggregations::mean(values)],
            AggFunc::Count => vec![aggregations::count(values)],
            AggFunc::Std => vec![aggregations::std(values)],
            AggFunc::Var => vec![aggregations::var(values)],
            AggFunc::Median => vec![aggregations::median(values)],
            AggFunc::Mode => vec![aggregations::mode(values, integral)],
            AggFunc::Min => vec![aggregations::min(values, integral)],
            AggFunc::Max => vec![aggregations::max(values, integral)],
            AggFunc::CumSum => aggregations::cumsum(values, integral),
            AggFunc::CumMin => aggregations::cummin(values),
            AggFunc::CumMax => aggregations::cummax(values),
            AggFunc::CumProd => aggregations::cumprod(values, integral),
        }
    }
}

impl Display for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggFunc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sum" => Ok(AggFunc::Sum),
            "mean" => Ok(AggFunc::Mean),
            "count" => Ok(AggFunc::Count),
            "std" => Ok(AggFunc::Std),
            "var" => Ok(AggFunc::Var),
            "median" => Ok(AggFunc::Median),
            "mode" => Ok(AggFunc::Mode),
            "min" => Ok(AggFunc::Min),
            "max" => Ok(AggFunc::Max),
            "cumsum" => Ok(AggFunc::CumSum),
            "cummin" => Ok(AggFunc::CumMin),
            "cummax" => Ok(AggFunc::CumMax),
            "cumprod" => Ok(AggFunc::CumProd),
            other => Err(Error::unsupported(other, "group-by aggregation")),
        }
    }
}

/// What to compute for the selected columns
#[derive(Debug, Clone, PartialEq)]
pub enum AggSpec {
    /// One op for every selected column; outputs are named `{column}_{op}`,
    /// numbered `_N` when that name is already a key or an earlier output
    Single(AggFunc),
    /// Ops per column; a column with one op keeps its name, a column with
    /// several ops gets `{column}_{op}` outputs
    PerColumn(Vec<(String, Vec<AggFunc>)>),
}

impl AggSpec {
    /// Parse a single op name
    pub fn single(op: &str) -> Result<Self> {
        Ok(AggSpec::Single(op.parse()?))
    }

    /// Parse a per-column map of op names
    pub fn per_column(spec: &[(&str, &[&str])]) -> Result<Self> {
        let parsed = spec
            .iter()
            .map(|(column, ops)| {
                let ops = ops
                    .iter()
                    .map(|op| {
                        op.parse::<AggFunc>()
                            .map_err(|_| Error::unsupported(*op, format!("column '{}'", column)))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((column.to_string(), ops))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(AggSpec::PerColumn(parsed))
    }
}

impl From<AggFunc> for AggSpec {
    fn from(op: AggFunc) -> Self {
        AggSpec::Single(op)
    }
}

/// Rows sharing one composite key
#[derive(Debug, Clone)]
struct Group {
    key: CompositeKey,
    key_values: Vec<Value>,
    rows: Vec<usize>,
}

/// A frame split by key columns
#[derive(Debug, Clone)]
pub struct GroupBy<'a> {
    df: &'a DataFrame,
    key_columns: Vec<String>,
    key_positions: Vec<usize>,
    /// Groups in first-seen order
    groups: Vec<Group>,
    lookup: HashMap<CompositeKey, usize>,
    /// Positions of the columns to aggregate, in frame order
    selected: Vec<usize>,
}

impl DataFrame {
    /// Group rows by the values of `keys`
    pub fn groupby(&self, keys: &[&str]) -> Result<GroupBy<'_>> {
        GroupBy::new(self, keys)
    }
}

impl<'a> GroupBy<'a> {
    pub fn new(df: &'a DataFrame, keys: &[&str]) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::InvalidInput(
                "group-by requires at least one key column".to_string(),
            ));
        }
        let key_columns: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        check_unique_columns(&key_columns)
            .map_err(|_| Error::InvalidInput(format!("repeated group-by keys {:?}", keys)))?;
        let key_positions = keys
            .iter()
            .map(|k| df.column_position(k))
            .collect::<Result<Vec<_>>>()?;

        let mut groups: Vec<Group> = Vec::new();
        let mut lookup: HashMap<CompositeKey, usize> = HashMap::new();
        for row in 0..df.row_count() {
            let (key, key_values) = CompositeKey::from_row(&df.data, &key_positions, row);
            match lookup.get(&key) {
                Some(&g) => groups[g].rows.push(row),
                None => {
                    lookup.insert(key.clone(), groups.len());
                    groups.push(Group {
                        key,
                        key_values,
                        rows: vec![row],
                    });
                }
            }
        }

        let selected = (0..df.column_count())
            .filter(|pos| !key_positions.contains(pos))
            .collect();

        log::debug!(
            "grouped {} rows into {} groups by {:?}",
            df.row_count(),
            groups.len(),
            key_columns
        );

        Ok(GroupBy {
            df,
            key_columns,
            key_positions,
            groups,
            lookup,
            selected,
        })
    }

    /// Restrict aggregation to some non-key columns
    pub fn select(mut self, columns: &[&str]) -> Result<Self> {
        let mut selected = Vec::with_capacity(columns.len());
        for name in columns {
            let pos = self.df.column_position(name)?;
            if self.key_positions.contains(&pos) {
                return Err(Error::InvalidInput(format!(
                    "'{}' is a group-by key and cannot be aggregated",
                    name
                )));
            }
            if !selected.contains(&pos) {
                selected.push(pos);
            }
        }
        selected.sort_unstable();
        self.selected = selected;
        Ok(self)
    }

    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    pub fn ngroups(&self) -> usize {
        self.groups.len()
    }

    /// Key values of every group, in first-seen order
    pub fn group_keys(&self) -> Vec<Vec<Value>> {
        self.groups.iter().map(|g| g.key_values.clone()).collect()
    }

    /// Rows of one group, with their original labels
    pub fn get_group(&self, key: &[Value]) -> Result<DataFrame> {
        if key.len() != self.key_columns.len() {
            return Err(Error::InvalidInput(format!(
                "expected {} key values, found {}",
                self.key_columns.len(),
                key.len()
            )));
        }
        let key = CompositeKey::new(key);
        let g = self
            .lookup
            .get(&key)
            .ok_or_else(|| Error::KeyNotFound(format!("group '{}'", key)))?;
        self.df.iloc(&self.groups[*g].rows)
    }

    /// Key columns plus the row count of each group
    pub fn size(&self) -> Result<DataFrame> {
        let mut names = self.key_columns.clone();
        names.push("size".to_string());
        let mut data: Vec<Vec<Value>> = vec![Vec::with_capacity(self.groups.len()); names.len()];
        for group in &self.groups {
            for (col, value) in data.iter_mut().zip(&group.key_values) {
                col.push(value.clone());
            }
            data[self.key_columns.len()].push(Value::from(group.rows.len()));
        }
        DataFrame::from_parts(names, data, None, self.df.config.clone())
    }

    /// Validate `spec` and compute every group's results
    pub fn aggregate(&self, spec: &AggSpec) -> Result<Aggregation> {
        let plan = self.plan(spec)?;
        let cumulative = plan
            .first()
            .map(|step| step.op.is_cumulative())
            .unwrap_or(false);

        let groups = self
            .groups
            .iter()
            .map(|group| {
                let columns = plan
                    .iter()
                    .map(|step| {
                        let source = &self.df.data[step.position];
                        let values: Vec<Value> =
                            group.rows.iter().map(|&r| source[r].clone()).collect();
                        step.op.apply(&values, step.integral)
                    })
                    .collect();
                log::trace!("aggregated group '{}' ({} rows)", group.key, group.rows.len());
                AggregatedGroup {
                    key_values: group.key_values.clone(),
                    columns,
                }
            })
            .collect();

        Ok(Aggregation {
            key_columns: self.key_columns.clone(),
            output_columns: plan.into_iter().map(|step| step.output).collect(),
            cumulative,
            groups,
            config: self.df.config.clone(),
        })
    }

    /// Aggregate and reassemble in one call
    pub fn agg(&self, spec: impl Into<AggSpec>) -> Result<DataFrame> {
        self.aggregate(&spec.into())?.to_dataframe()
    }

    pub fn sum(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Sum)
    }

    pub fn mean(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Mean)
    }

    pub fn count(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Count)
    }

    pub fn std(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Std)
    }

    pub fn var(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Var)
    }

    pub fn median(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Median)
    }

    pub fn mode(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Mode)
    }

    pub fn min(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Min)
    }

    pub fn max(&self) -> Result<DataFrame> {
        self.agg(AggFunc::Max)
    }

    pub fn cumsum(&self) -> Result<DataFrame> {
        self.agg(AggFunc::CumSum)
    }

    pub fn cummin(&self) -> Result<DataFrame> {
        self.agg(AggFunc::CumMin)
    }

    pub fn cummax(&self) -> Result<DataFrame> {
        self.agg(AggFunc::CumMax)
    }

    pub fn cumprod(&self) -> Result<DataFrame> {
        self.agg(AggFunc::CumProd)
    }

    /// Resolve `spec` into ordered steps, rejecting bad requests up front
    fn plan(&self, spec: &AggSpec) -> Result<Vec<AggStep>> {
        let mut per_position: Vec<(usize, Vec<AggFunc>, bool)> = match spec {
            AggSpec::Single(op) => self
                .selected
                .iter()
                .map(|&pos| (pos, vec![*op], true))
                .collect(),
            AggSpec::PerColumn(entries) => {
                let mut resolved = Vec::with_capacity(entries.len());
                for (name, ops) in entries {
                    let pos = self.df.column_position(name)?;
                    if self.key_positions.contains(&pos) {
                        return Err(Error::InvalidInput(format!(
                            "'{}' is a group-by key and cannot be aggregated",
                            name
                        )));
                    }
                    if ops.is_empty() {
                        return Err(Error::InvalidInput(format!(
                            "no aggregation given for column '{}'",
                            name
                        )));
                    }
                    if resolved.iter().any(|(p, _, _)| *p == pos) {
                        return Err(Error::InvalidInput(format!(
                            "column '{}' listed twice",
                            name
                        )));
                    }
                    resolved.push((pos, ops.clone(), ops.len() > 1));
                }
                resolved
            }
        };
        per_position.sort_by_key(|(pos, _, _)| *pos);

        let mut steps = Vec::new();
        for (pos, ops, suffixed) in per_position {
            let name = &self.df.columns[pos];
            let dtype = self.df.dtypes[pos];
            for op in ops {
                if dtype == DType::String && op != AggFunc::Count {
                    return Err(Error::unsupported(
                        op.name(),
                        format!("column '{}' of dtype string", name),
                    ));
                }
                let output = if suffixed {
                    format!("{}_{}", name, op)
                } else {
                    name.clone()
                };
                steps.push(AggStep {
                    position: pos,
                    op,
                    integral: matches!(dtype, DType::Int32 | DType::Boolean),
                    output,
                });
            }
        }

        if let Some(first) = steps.first() {
            if let Some(other) = steps
                .iter()
                .find(|s| s.op.is_cumulative() != first.op.is_cumulative())
            {
                return Err(Error::InvalidInput(format!(
                    "cannot mix '{}' and '{}': cumulative and reducing results differ in length",
                    first.op, other.op
                )));
            }
        }

        // outputs never shadow a key column or each other
        let mut namer = ColumnNamer::new();
        for key in &self.key_columns {
            namer.assign(key);
        }
        for step in &mut steps {
            step.output = namer.assign(&step.output);
        }

        Ok(steps)
    }
}

#[derive(Debug, Clone)]
struct AggStep {
    position: usize,
    op: AggFunc,
    integral: bool,
    output: String,
}

/// Results of one group
#[derive(Debug, Clone)]
pub struct AggregatedGroup {
    pub key_values: Vec<Value>,
    /// One vector per output column: a single value, or one per input row
    pub columns: Vec<Vec<Value>>,
}

/// Per-group results ready to be reassembled into a frame
#[derive(Debug, Clone)]
pub struct Aggregation {
    key_columns: Vec<String>,
    output_columns: Vec<String>,
    cumulative: bool,
    groups: Vec<AggregatedGroup>,
    config: FrameConfig,
}

impl Aggregation {
    pub fn groups(&self) -> &[AggregatedGroup] {
        &self.groups
    }

    pub fn output_columns(&self) -> &[String] {
        &self.output_columns
    }

    pub fn is_cumulative(&self) -> bool {
        self.cumulative
    }

    /// Key columns first, then the aggregated columns; each group
    /// contributes one row, or one row per input row for cumulative ops
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut names = self.key_columns.clone();
        names.extend(self.output_columns.iter().cloned());
        let key_width = self.key_columns.len();
        let mut data: Vec<Vec<Value>> = vec![Vec::new(); names.len()];

        for group in &self.groups {
            let rows = group.columns.first().map(Vec::len).unwrap_or(1);
            for (col, value) in data.iter_mut().zip(&group.key_values) {
                col.extend(std::iter::repeat(value.clone()).take(rows));
            }
            for (col, values) in data[key_width..].iter_mut().zip(&group.columns) {
                col.extend(values.iter().cloned());
            }
        }

        DataFrame::from_parts(names, data, None, self.config.clone())
    }
}
