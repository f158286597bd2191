use crate::core::HealthBand;
use crate::portfolio::{InsightSeverity, MultiTeamAssessmentResult};
use crate::precision::{PrecisionResult, PrecisionTier};
use crate::priority::{PrioritizedDimension, PrioritizedDimensions, PriorityTier};
use crate::tiers::IndicatorTier;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_tier(&mut self, percentile: f64, tier: &IndicatorTier) -> anyhow::Result<()>;
    fn write_precision(&mut self, precision: &PrecisionResult) -> anyhow::Result<()>;
    fn write_prioritization(
        &mut self,
        title: &str,
        prioritized: &PrioritizedDimensions,
    ) -> anyhow::Result<()>;
    fn write_portfolio(&mut self, result: &MultiTeamAssessmentResult) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_tier(&mut self, percentile: f64, tier: &IndicatorTier) -> anyhow::Result<()> {
        self.write_json(&serde_json::json!({
            "percentile": percentile,
            "tier": tier,
        }))
    }

    fn write_precision(&mut self, precision: &PrecisionResult) -> anyhow::Result<()> {
        self.write_json(precision)
    }

    fn write_prioritization(
        &mut self,
        _title: &str,
        prioritized: &PrioritizedDimensions,
    ) -> anyhow::Result<()> {
        self.write_json(prioritized)
    }

    fn write_portfolio(&mut self, result: &MultiTeamAssessmentResult) -> anyhow::Result<()> {
        self.write_json(result)
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_tier(&mut self, percentile: f64, tier: &IndicatorTier) -> anyhow::Result<()> {
        writeln!(self.writer, "# Indicator Tier")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Percentile | Tier | Range | Risk |")?;
        writeln!(self.writer, "|------------|------|-------|------|")?;
        writeln!(
            self.writer,
            "| {} | {} | {}-{} | {} |",
            percentile,
            format!("{} {}", tier.short_label(), tier.name),
            tier.min,
            tier.max,
            if tier.is_risk { "yes" } else { "no" }
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", tier.description)?;
        Ok(())
    }

    fn write_precision(&mut self, precision: &PrecisionResult) -> anyhow::Result<()> {
        writeln!(self.writer, "# Precision: {}", precision.label)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Relative precision | {}% |",
            precision.relative_precision
        )?;
        writeln!(self.writer, "| Interval width | {} |", precision.ci_width)?;
        writeln!(self.writer, "| Margin | ±{} |", precision.margin)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", precision.explanation)?;
        Ok(())
    }

    fn write_prioritization(
        &mut self,
        title: &str,
        prioritized: &PrioritizedDimensions,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "# Priorities: {title}")?;
        writeln!(self.writer)?;
        for tier in [PriorityTier::Now, PriorityTier::Next, PriorityTier::Later] {
            let items = prioritized.tier(tier);
            writeln!(
                self.writer,
                "## {} ({}, {} dimensions)",
                tier.label(),
                tier.heading(),
                items.len()
            )?;
            writeln!(self.writer)?;
            if items.is_empty() {
                writeln!(self.writer, "_None_")?;
            }
            for item in items {
                writeln!(
                    self.writer,
                    "- **{}** ({}, {}): {}",
                    item.dimension.dimension_name,
                    item.resolved_score.round(),
                    item.dimension.trend,
                    item.reason
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_portfolio(&mut self, result: &MultiTeamAssessmentResult) -> anyhow::Result<()> {
        self.write_portfolio_header(result)?;
        self.write_portfolio_teams(result)?;
        self.write_portfolio_dimensions(result)?;
        self.write_portfolio_gaps(result)?;
        self.write_portfolio_investments(result)?;
        self.write_portfolio_insights(result)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_portfolio_header(&mut self, result: &MultiTeamAssessmentResult) -> anyhow::Result<()> {
        let summary = &result.summary;
        writeln!(self.writer, "# Portfolio Health: {}", result.name)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Period: {} to {} ({} days)",
            result.date_range.start,
            result.date_range.end,
            result.date_range.days()
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Teams | {} |", summary.team_count)?;
        writeln!(self.writer, "| Dimensions | {} |", summary.dimension_count)?;
        writeln!(
            self.writer,
            "| Overall health ({:?}) | {} ({}) |",
            summary.aggregation_mode,
            summary.overall_health_score,
            HealthBand::from_score(summary.overall_health_score).descriptor()
        )?;
        writeln!(
            self.writer,
            "| Teams needing attention | {} |",
            summary.teams_needing_attention
        )?;
        writeln!(self.writer, "| Outlier teams | {} |", summary.outlier_count)?;
        writeln!(
            self.writer,
            "| Systemic issues | {} |",
            summary.systemic_issue_count
        )?;
        writeln!(self.writer)?;
        if summary.team_count > 0 {
            let pct = summary.distribution.percentages();
            writeln!(
                self.writer,
                "Distribution: {}% excellent, {}% good, {}% average, {}% below average, {}% needs attention",
                pct.excellent, pct.good, pct.average, pct.below_average, pct.needs_attention
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_portfolio_teams(&mut self, result: &MultiTeamAssessmentResult) -> anyhow::Result<()> {
        if result.teams.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Teams")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Rank | Team | Score | vs Mean | Weakest | Outlier |")?;
        writeln!(self.writer, "|------|------|-------|---------|---------|---------|")?;
        for team in &result.teams {
            writeln!(
                self.writer,
                "| {} | {} | {} | {:+} | {} | {} |",
                team.rank,
                team.team_name,
                team.overall_health_score,
                team.deviation_from_mean,
                team.weakest_dimension
                    .as_ref()
                    .map_or("-", |d| d.dimension_name.as_str()),
                team.outlier_direction
                    .map_or("-".to_string(), |d| format!("{d:?}").to_lowercase())
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_portfolio_dimensions(
        &mut self,
        result: &MultiTeamAssessmentResult,
    ) -> anyhow::Result<()> {
        if result.dimensions.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Dimensions")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Dimension | Mean | Median | Min | Max | Spread | Std Dev | Attention |"
        )?;
        writeln!(
            self.writer,
            "|-----------|------|--------|-----|-----|--------|---------|-----------|"
        )?;
        for dim in &result.dimensions {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} | {} | {} |",
                dim.dimension_name,
                dim.stats.mean,
                dim.stats.median,
                dim.stats.min,
                dim.stats.max,
                dim.stats.spread(),
                dim.stats.std_dev,
                dim.teams_needing_attention
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_portfolio_gaps(&mut self, result: &MultiTeamAssessmentResult) -> anyhow::Result<()> {
        if result.common_gaps.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Common Gaps")?;
        writeln!(self.writer)?;
        for gap in &result.common_gaps {
            writeln!(
                self.writer,
                "- {}{}: {} teams ({}%), average {}",
                gap.dimension_name,
                if gap.is_systemic_issue { " **(systemic)**" } else { "" },
                gap.affected_team_count,
                gap.affected_percentage,
                gap.average_score
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_portfolio_investments(
        &mut self,
        result: &MultiTeamAssessmentResult,
    ) -> anyhow::Result<()> {
        if result.investment_priorities.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Investment Priorities")?;
        writeln!(self.writer)?;
        for priority in &result.investment_priorities {
            writeln!(
                self.writer,
                "{}. **{}** (impact {}): {}",
                priority.rank, priority.dimension_name, priority.impact_score, priority.rationale
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_portfolio_insights(
        &mut self,
        result: &MultiTeamAssessmentResult,
    ) -> anyhow::Result<()> {
        if result.leadership_insights.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Leadership Insights")?;
        writeln!(self.writer)?;
        for insight in &result.leadership_insights {
            writeln!(
                self.writer,
                "- [{}] **{}**: {}",
                severity_label(insight.severity),
                insight.title,
                insight.detail
            )?;
        }
        Ok(())
    }
}

fn severity_label(severity: InsightSeverity) -> &'static str {
    match severity {
        InsightSeverity::Critical => "critical",
        InsightSeverity::Warning => "warning",
        InsightSeverity::Info => "info",
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

fn color_for_band(score: f64) -> Color {
    match HealthBand::from_score(score) {
        HealthBand::NeedsAttention => Color::Red,
        HealthBand::BelowAverage => Color::DarkYellow,
        HealthBand::Average => Color::Grey,
        HealthBand::Good => Color::Green,
        HealthBand::Excellent => Color::Blue,
    }
}

fn colored_score(score: f64) -> ColoredString {
    let text = score.to_string();
    match HealthBand::from_score(score) {
        HealthBand::NeedsAttention => text.red().bold(),
        HealthBand::BelowAverage => text.yellow(),
        HealthBand::Average => text.normal(),
        HealthBand::Good => text.green(),
        HealthBand::Excellent => text.blue().bold(),
    }
}

fn colored_tier_label(tier: PriorityTier) -> ColoredString {
    match tier {
        PriorityTier::Now => tier.label().red().bold(),
        PriorityTier::Next => tier.label().yellow().bold(),
        PriorityTier::Later => tier.label().green().bold(),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn priority_row(item: &PrioritizedDimension) -> Vec<Cell> {
    vec![
        Cell::new(&item.dimension.dimension_name),
        Cell::new(item.resolved_score.round()).fg(color_for_band(item.resolved_score)),
        Cell::new(item.dimension.trend),
        Cell::new(&item.reason),
    ]
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_tier(&mut self, percentile: f64, tier: &IndicatorTier) -> anyhow::Result<()> {
        let label = format!("{} {}", tier.short_label(), tier.name);
        let name = if tier.is_risk {
            label.red().bold()
        } else {
            label.bold()
        };
        writeln!(self.writer, "Percentile {percentile}: {name}")?;
        writeln!(
            self.writer,
            "  Range {}-{}, color {}",
            tier.min, tier.max, tier.color
        )?;
        writeln!(self.writer, "  {}", tier.description.dimmed())?;
        Ok(())
    }

    fn write_precision(&mut self, precision: &PrecisionResult) -> anyhow::Result<()> {
        let label = match precision.tier {
            PrecisionTier::High => precision.label.green().bold(),
            PrecisionTier::Moderate => precision.label.blue().bold(),
            PrecisionTier::Low => precision.label.yellow().bold(),
            PrecisionTier::Insufficient => precision.label.red().bold(),
        };
        writeln!(self.writer, "{label}")?;
        writeln!(
            self.writer,
            "  Relative precision: {}%",
            precision.relative_precision
        )?;
        writeln!(
            self.writer,
            "  Interval width: {} (±{})",
            precision.ci_width, precision.margin
        )?;
        writeln!(self.writer, "  {}", precision.explanation.dimmed())?;
        Ok(())
    }

    fn write_prioritization(
        &mut self,
        title: &str,
        prioritized: &PrioritizedDimensions,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", format!("Priorities: {title}").bold().blue())?;
        let counts = prioritized.counts();
        writeln!(
            self.writer,
            "  {} now, {} next, {} later ({} dimensions)",
            counts.now, counts.next, counts.later, counts.total
        )?;
        writeln!(self.writer)?;
        for tier in [PriorityTier::Now, PriorityTier::Next, PriorityTier::Later] {
            let items = prioritized.tier(tier);
            if items.is_empty() {
                continue;
            }
            writeln!(
                self.writer,
                "{} {}",
                colored_tier_label(tier),
                tier.heading().dimmed()
            )?;
            let mut table = new_table();
            table.set_header(vec!["Dimension", "Score", "Trend", "Why"]);
            for item in items {
                table.add_row(priority_row(item));
            }
            writeln!(self.writer, "{table}")?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_portfolio(&mut self, result: &MultiTeamAssessmentResult) -> anyhow::Result<()> {
        let summary = &result.summary;
        writeln!(
            self.writer,
            "{}",
            format!("Portfolio Health: {}", result.name).bold().blue()
        )?;
        writeln!(
            self.writer,
            "  {} teams, {} dimensions, {} to {} ({} days)",
            summary.team_count,
            summary.dimension_count,
            result.date_range.start,
            result.date_range.end,
            result.date_range.days()
        )?;
        writeln!(
            self.writer,
            "  Overall health: {} ({})",
            colored_score(summary.overall_health_score),
            HealthBand::from_score(summary.overall_health_score).descriptor()
        )?;
        writeln!(self.writer)?;

        if !result.teams.is_empty() {
            let mut table = new_table();
            table.set_header(vec!["Rank", "Team", "Score", "vs Mean", "Weakest", "Outlier"]);
            for team in &result.teams {
                table.add_row(vec![
                    Cell::new(team.rank),
                    Cell::new(&team.team_name),
                    Cell::new(team.overall_health_score)
                        .fg(color_for_band(team.overall_health_score)),
                    Cell::new(format!("{:+}", team.deviation_from_mean)),
                    Cell::new(
                        team.weakest_dimension
                            .as_ref()
                            .map_or("-", |d| d.dimension_name.as_str()),
                    ),
                    Cell::new(if team.is_outlier { "yes" } else { "" }),
                ]);
            }
            writeln!(self.writer, "{table}")?;
            writeln!(self.writer)?;
        }

        if !result.dimensions.is_empty() {
            let mut table = new_table();
            table.set_header(vec![
                "Dimension", "Mean", "Median", "Min", "Max", "Spread", "Std Dev",
            ]);
            for dim in &result.dimensions {
                table.add_row(vec![
                    Cell::new(&dim.dimension_name),
                    Cell::new(dim.stats.mean).fg(color_for_band(dim.stats.mean)),
                    Cell::new(dim.stats.median),
                    Cell::new(dim.stats.min),
                    Cell::new(dim.stats.max),
                    Cell::new(dim.stats.spread()),
                    Cell::new(dim.stats.std_dev),
                ]);
            }
            writeln!(self.writer, "{table}")?;
            writeln!(self.writer)?;
        }

        if !result.investment_priorities.is_empty() {
            writeln!(self.writer, "{}", "Investment priorities".bold())?;
            for p in &result.investment_priorities {
                writeln!(
                    self.writer,
                    "  {}. {} (impact {}): {}",
                    p.rank,
                    p.dimension_name.yellow(),
                    p.impact_score,
                    p.rationale
                )?;
            }
            writeln!(self.writer)?;
        }

        if !result.leadership_insights.is_empty() {
            writeln!(self.writer, "{}", "Leadership insights".bold())?;
            for insight in &result.leadership_insights {
                let marker = match insight.severity {
                    InsightSeverity::Critical => "!!".red().bold(),
                    InsightSeverity::Warning => "! ".yellow().bold(),
                    InsightSeverity::Info => "- ".normal(),
                };
                writeln!(self.writer, "  {marker} {}", insight.title.bold())?;
                writeln!(self.writer, "     {}", insight.detail)?;
            }
        }
        Ok(())
    }
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    create_writer_to(format, Box::new(std::io::stdout()))
}

pub fn create_writer_to(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
