/// Numeric columns carried by every game-log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatColumn {
    Pts,
    Reb,
    Ast,
    Fg3m,
    Stl,
    Blk,
    Tov,
    Fp,
}

impl StatColumn {
    pub const ALL: [StatColumn; 8] = [
        StatColumn::Pts,
        StatColumn::Reb,
        StatColumn::Ast,
        StatColumn::Fg3m,
        StatColumn::Stl,
        StatColumn::Blk,
        StatColumn::Tov,
        StatColumn::Fp,
    ];

    /// Header used by the game-log CSV export.
    pub fn header(self) -> &'static str {
        match self {
            StatColumn::Pts => "PTS",
            StatColumn::Reb => "REB",
            StatColumn::Ast => "AST",
            StatColumn::Fg3m => "3PM",
            StatColumn::Stl => "STL",
            StatColumn::Blk => "BLK",
            StatColumn::Tov => "TOV",
            StatColumn::Fp => "FP",
        }
    }
}

/// Atomic per-game stats a line can be set on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseStat {
    Points,
    Rebounds,
    Assists,
    Threes,
    Steals,
    Blocks,
    Turnovers,
    FantasyScore,
}

impl BaseStat {
    pub fn column(self) -> StatColumn {
        match self {
            BaseStat::Points => StatColumn::Pts,
            BaseStat::Rebounds => StatColumn::Reb,
            BaseStat::Assists => StatColumn::Ast,
            BaseStat::Threes => StatColumn::Fg3m,
            BaseStat::Steals => StatColumn::Stl,
            BaseStat::Blocks => StatColumn::Blk,
            BaseStat::Turnovers => StatColumn::Tov,
            BaseStat::FantasyScore => StatColumn::Fp,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BaseStat::Points => "Points",
            BaseStat::Rebounds => "Rebounds",
            BaseStat::Assists => "Assists",
            BaseStat::Threes => "Threes",
            BaseStat::Steals => "Steals",
            BaseStat::Blocks => "Blocks",
            BaseStat::Turnovers => "Turnovers",
            BaseStat::FantasyScore => "Fantasy Score",
        }
    }

    /// Only these projections are remembered for combo composition.
    pub fn seeds_projection_cache(self) -> bool {
        matches!(
            self,
            BaseStat::Points | BaseStat::Rebounds | BaseStat::Assists
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComboStat {
    PtsRebsAsts,
    PtsRebs,
    PtsAsts,
    RebsAsts,
    StealsBlocks,
}

impl ComboStat {
    pub fn components(self) -> &'static [BaseStat] {
        match self {
            ComboStat::PtsRebsAsts => &[BaseStat::Points, BaseStat::Rebounds, BaseStat::Assists],
            ComboStat::PtsRebs => &[BaseStat::Points, BaseStat::Rebounds],
            ComboStat::PtsAsts => &[BaseStat::Points, BaseStat::Assists],
            ComboStat::RebsAsts => &[BaseStat::Rebounds, BaseStat::Assists],
            ComboStat::StealsBlocks => &[BaseStat::Steals, BaseStat::Blocks],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ComboStat::PtsRebsAsts => "Pts+Rebs+Asts",
            ComboStat::PtsRebs => "Pts+Rebs",
            ComboStat::PtsAsts => "Pts+Asts",
            ComboStat::RebsAsts => "Rebs+Asts",
            ComboStat::StealsBlocks => "Steals+Blocks",
        }
    }
}

/// A resolved prop stat. Aliases never survive past [`StatKind::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Single(BaseStat),
    Combo(ComboStat),
}

impl StatKind {
    /// Exact, case-sensitive lookup of a catalog stat name.
    pub fn parse(raw: &str) -> Option<StatKind> {
        let kind = match raw {
            "Points" => StatKind::Single(BaseStat::Points),
            "Rebounds" => StatKind::Single(BaseStat::Rebounds),
            "Assists" => StatKind::Single(BaseStat::Assists),
            "Threes" | "Threes Made" | "Three Pointers Made" => StatKind::Single(BaseStat::Threes),
            "Steals" => StatKind::Single(BaseStat::Steals),
            "Blocks" | "Blocked Shots" => StatKind::Single(BaseStat::Blocks),
            "Turnovers" => StatKind::Single(BaseStat::Turnovers),
            "Fantasy Score" => StatKind::Single(BaseStat::FantasyScore),
            "Pts+Rebs+Asts" | "PRA" => StatKind::Combo(ComboStat::PtsRebsAsts),
            "Pts+Rebs" => StatKind::Combo(ComboStat::PtsRebs),
            "Pts+Asts" => StatKind::Combo(ComboStat::PtsAsts),
            "Rebs+Asts" => StatKind::Combo(ComboStat::RebsAsts),
            "Steals+Blocks" | "Steals + Blocks" => StatKind::Combo(ComboStat::StealsBlocks),
            _ => return None,
        };
        Some(kind)
    }

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Single(stat) => stat.label(),
            StatKind::Combo(combo) => combo.label(),
        }
    }

    pub fn is_combo(self) -> bool {
        matches!(self, StatKind::Combo(_))
    }

    pub fn spec(self) -> StatSpec {
        let columns = match self {
            StatKind::Single(stat) => vec![stat.column()],
            StatKind::Combo(combo) => combo.components().iter().map(|s| s.column()).collect(),
        };
        StatSpec {
            columns,
            display_name: self.label(),
        }
    }
}

/// Columns summed per game for a stat, plus the name cards report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSpec {
    pub columns: Vec<StatColumn>,
    pub display_name: &'static str,
}

/// Catalog stat after ingestion: either a known variant or the raw text we could not place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineStat {
    Known(StatKind),
    Unsupported(String),
}

impl LineStat {
    pub fn from_raw(raw: &str) -> Self {
        match StatKind::parse(raw) {
            Some(kind) => LineStat::Known(kind),
            None => LineStat::Unsupported(raw.to_string()),
        }
    }
}
