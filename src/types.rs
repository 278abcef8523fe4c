//! Shared types and enums used across CLIMAVIEW.
//! Includes the closed enumerations the UI layer selects from: `Indicator`,
//! `Scenario`, `Period`, `Model`, and `DisplayMode`, each with a user-facing label.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Climate indicator identifiers. Each carries a user-facing label and a unit
/// string for the legend.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum Indicator {
    TgMeanAnnual,
    TxMeanAnnual,
    TnMeanAnnual,
    DaysTxAbove35,
    DaysTxAbove30,
    DaysTnAbove25,
    PrTotalAnnual,
    DaysPrAbove50mm,
    DaysPrAbove100mm,
    WbgtMeanAnnual,
    DaysWbgtAbove31,
}

impl Indicator {
    pub const ALL: [Indicator; 11] = [
        Indicator::TgMeanAnnual,
        Indicator::TxMeanAnnual,
        Indicator::TnMeanAnnual,
        Indicator::DaysTxAbove35,
        Indicator::DaysTxAbove30,
        Indicator::DaysTnAbove25,
        Indicator::PrTotalAnnual,
        Indicator::DaysPrAbove50mm,
        Indicator::DaysPrAbove100mm,
        Indicator::WbgtMeanAnnual,
        Indicator::DaysWbgtAbove31,
    ];

    /// Stable identifier used in asset filenames and ramp selection.
    pub fn id(&self) -> &'static str {
        match self {
            Indicator::TgMeanAnnual => "tg_mean_annual",
            Indicator::TxMeanAnnual => "tx_mean_annual",
            Indicator::TnMeanAnnual => "tn_mean_annual",
            Indicator::DaysTxAbove35 => "days_tx_above35",
            Indicator::DaysTxAbove30 => "days_tx_above30",
            Indicator::DaysTnAbove25 => "days_tn_above25",
            Indicator::PrTotalAnnual => "pr_total_annual",
            Indicator::DaysPrAbove50mm => "days_pr_above50mm",
            Indicator::DaysPrAbove100mm => "days_pr_above100mm",
            Indicator::WbgtMeanAnnual => "wbgt_mean_annual",
            Indicator::DaysWbgtAbove31 => "days_wbgt_above31",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Indicator::TgMeanAnnual => "年平均気温",
            Indicator::TxMeanAnnual => "年平均最高気温",
            Indicator::TnMeanAnnual => "年平均最低気温",
            Indicator::DaysTxAbove35 => "猛暑日数（35℃以上）",
            Indicator::DaysTxAbove30 => "真夏日数（30℃以上）",
            Indicator::DaysTnAbove25 => "熱帯夜数（25℃以上）",
            Indicator::PrTotalAnnual => "年間降水量",
            Indicator::DaysPrAbove50mm => "大雨日数（50mm以上）",
            Indicator::DaysPrAbove100mm => "大雨日数（100mm以上）",
            Indicator::WbgtMeanAnnual => "年平均暑さ指数",
            Indicator::DaysWbgtAbove31 => "暑さ指数危険日数",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Indicator::TgMeanAnnual | Indicator::TxMeanAnnual | Indicator::TnMeanAnnual => "℃",
            Indicator::DaysTxAbove35
            | Indicator::DaysTxAbove30
            | Indicator::DaysTnAbove25
            | Indicator::DaysPrAbove50mm
            | Indicator::DaysPrAbove100mm
            | Indicator::DaysWbgtAbove31 => "日",
            Indicator::PrTotalAnnual => "mm",
            Indicator::WbgtMeanAnnual => "",
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Emission pathway / scenario identifiers (baseline + 4 SSP pathway codes).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum Scenario {
    Baseline,
    Ssp126,
    Ssp245,
    Ssp370,
    Ssp585,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Baseline,
        Scenario::Ssp126,
        Scenario::Ssp245,
        Scenario::Ssp370,
        Scenario::Ssp585,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Scenario::Baseline => "baseline",
            Scenario::Ssp126 => "ssp126",
            Scenario::Ssp245 => "ssp245",
            Scenario::Ssp370 => "ssp370",
            Scenario::Ssp585 => "ssp585",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Baseline => "基準期間",
            Scenario::Ssp126 => "SSP1-2.6 (1.5℃目標)",
            Scenario::Ssp245 => "SSP2-4.5 (中位安定化)",
            Scenario::Ssp370 => "SSP3-7.0 (参照シナリオ)",
            Scenario::Ssp585 => "SSP5-8.5 (高位参照)",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Analysis window identifiers. Each value names the center year of a 20-year
/// window; the ordering below is the fixed display order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum Period {
    Y2010,
    Y2020,
    Y2030,
    Y2040,
    Y2050,
    Y2060,
    Y2070,
    Y2080,
    Y2090,
}

impl Period {
    pub const ALL: [Period; 9] = [
        Period::Y2010,
        Period::Y2020,
        Period::Y2030,
        Period::Y2040,
        Period::Y2050,
        Period::Y2060,
        Period::Y2070,
        Period::Y2080,
        Period::Y2090,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Period::Y2010 => "2010",
            Period::Y2020 => "2020",
            Period::Y2030 => "2030",
            Period::Y2040 => "2040",
            Period::Y2050 => "2050",
            Period::Y2060 => "2060",
            Period::Y2070 => "2070",
            Period::Y2080 => "2080",
            Period::Y2090 => "2090",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Y2010 => "基準年度 2010 (2000-2020)",
            Period::Y2020 => "2020 (2010-2030)",
            Period::Y2030 => "2030 (2020-2040)",
            Period::Y2040 => "2040 (2030-2050)",
            Period::Y2050 => "2050 (2040-2060)",
            Period::Y2060 => "2060 (2050-2070)",
            Period::Y2070 => "2070 (2060-2080)",
            Period::Y2080 => "2080 (2070-2090)",
            Period::Y2090 => "2090 (2080-2100)",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Climate model identifiers (baseline/ensemble + named CMIP6 models).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum Model {
    Baseline,
    Ensemble,
    Miroc6,
    MriEsm2_0,
    MpiEsm1_2Hr,
    AccessCm2,
    IpslCm6aLr,
}

impl Model {
    pub const ALL: [Model; 7] = [
        Model::Baseline,
        Model::Ensemble,
        Model::Miroc6,
        Model::MriEsm2_0,
        Model::MpiEsm1_2Hr,
        Model::AccessCm2,
        Model::IpslCm6aLr,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Model::Baseline => "baseline",
            Model::Ensemble => "ensemble",
            Model::Miroc6 => "miroc6",
            Model::MriEsm2_0 => "mri-esm2-0",
            Model::MpiEsm1_2Hr => "mpi-esm1-2-hr",
            Model::AccessCm2 => "access-cm2",
            Model::IpslCm6aLr => "ipsl-cm6a-lr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Model::Baseline => "基準",
            Model::Ensemble => "ENSAMBLE",
            Model::Miroc6 => "MIROC6",
            Model::MriEsm2_0 => "MRI-ESM2-0",
            Model::MpiEsm1_2Hr => "MPI-ESM1-2-HR",
            Model::AccessCm2 => "ACCESS-CM2",
            Model::IpslCm6aLr => "IPSL-CM6A-LR",
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// How a raster's values are presented relative to the baseline.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum DisplayMode {
    Absolute,
    Change,
    Rate,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] =
        [DisplayMode::Absolute, DisplayMode::Change, DisplayMode::Rate];

    pub fn id(&self) -> &'static str {
        match self {
            DisplayMode::Absolute => "absolute",
            DisplayMode::Change => "change",
            DisplayMode::Rate => "rate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Absolute => "絶対値",
            DisplayMode::Change => "変化量",
            DisplayMode::Rate => "変化率",
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
