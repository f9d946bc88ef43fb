use crate::infra::{load_catalog, load_scoring_config, InMemoryBetRepository};
use bet_ranking::error::AppError;
use bet_ranking::rankings::{
    BetId, OverallVariant, OverviewQuery, RankedEntry, RankingOverview, RankingService,
};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Catalog CSV export to rank
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Category weight table in JSON (defaults to the standard categories)
    #[arg(long)]
    pub(crate) scoring_config: Option<PathBuf>,
    /// Overall score variant: `weighted` (listings) or `flat` (home dashboard)
    #[arg(long, default_value = "weighted")]
    pub(crate) variant: OverallVariant,
    /// Number of entries in the top listing
    #[arg(long, default_value_t = 10)]
    pub(crate) top: usize,
    /// Bet id whose neighbours should be listed
    #[arg(long)]
    pub(crate) bet: Option<String>,
    /// Entries listed above and below `--bet`
    #[arg(long, default_value_t = 3)]
    pub(crate) window: usize,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let bets = load_catalog(Some(args.catalog.as_path()))?;
    let config = load_scoring_config(args.scoring_config.as_deref())?;
    let service = RankingService::new(Arc::new(InMemoryBetRepository::from_bets(bets)), config);

    let query = OverviewQuery {
        variant: args.variant,
        top: args.top,
        window: args.window,
        reference: args.bet.map(BetId),
    };
    let overview = service.overview(&query)?;

    match args.format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&overview).map_err(std::io::Error::from)?;
            println!("{rendered}");
        }
        OutputFormat::Table => print!("{}", render_table(&overview)),
    }

    Ok(())
}

fn render_table(overview: &RankingOverview) -> String {
    let mut out = format!(
        "Ranking ({}) - {} bets\n",
        overview.variant.label(),
        overview.total
    );
    push_rows(&mut out, &overview.top);

    if let Some(reference) = &overview.reference {
        match overview.position {
            Some(position) => {
                out.push_str(&format!("\nAround {reference} (#{position})\n"));
                push_rows(&mut out, &overview.above);
                out.push_str(&format!("  -> {reference}\n"));
                push_rows(&mut out, &overview.below);
            }
            None => out.push_str(&format!("\n{reference} is not ranked\n")),
        }
    }

    out
}

fn push_rows(out: &mut String, entries: &[RankedEntry]) {
    for entry in entries {
        out.push_str(&format!(
            "  #{:<3} {:>3}  {} ({})\n",
            entry.position, entry.score, entry.name, entry.id
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, score: u8, position: usize) -> RankedEntry {
        RankedEntry {
            id: BetId::new(id),
            name: format!("Bet {id}"),
            score,
            position,
        }
    }

    #[test]
    fn table_lists_top_and_neighbourhood() {
        let overview = RankingOverview {
            variant: OverallVariant::WeightedCategories,
            total: 3,
            top: vec![entry("a", 90, 1), entry("b", 80, 2)],
            reference: Some(BetId::new("b")),
            position: Some(2),
            above: vec![entry("a", 90, 1)],
            below: vec![entry("c", 10, 3)],
        };

        let table = render_table(&overview);
        assert!(table.starts_with("Ranking (weighted_categories) - 3 bets"));
        assert!(table.contains("Around b (#2)"));
        assert!(table.contains("#3    10  Bet c (c)"));
    }

    #[test]
    fn table_flags_unranked_reference() {
        let overview = RankingOverview {
            variant: OverallVariant::FlatAverage,
            total: 0,
            top: Vec::new(),
            reference: Some(BetId::new("ghost")),
            position: None,
            above: Vec::new(),
            below: Vec::new(),
        };

        assert!(render_table(&overview).contains("ghost is not ranked"));
    }
}
