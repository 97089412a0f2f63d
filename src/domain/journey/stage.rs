//! Stage, Phase and StageKind - the closed vocabulary of the interview.
//!
//! The whole sequence is declared once in [`stage_table!`]; the macro emits the
//! `Stage` enum (declaration order == interview order) and the parallel
//! `STAGE_TABLE` of [`StageSpec`] records queried by `stage_graph`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The eight phases of the journey, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    CoreConcept,
    MarketAnalysis,
    BusinessModeling,
    Branding,
    ProductDevelopment,
    MarketingSales,
    Organization,
    FinalOutputs,
}

impl Phase {
    /// Returns all phases in canonical order.
    pub fn all() -> &'static [Phase] {
        &[
            Phase::CoreConcept,
            Phase::MarketAnalysis,
            Phase::BusinessModeling,
            Phase::Branding,
            Phase::ProductDevelopment,
            Phase::MarketingSales,
            Phase::Organization,
            Phase::FinalOutputs,
        ]
    }

    /// 1-based phase number.
    pub fn number(&self) -> usize {
        Self::all().iter().position(|p| p == self).map_or(0, |i| i + 1)
    }

    /// Returns the display name.
    pub fn title(&self) -> &'static str {
        match self {
            Phase::CoreConcept => "Core Concept & Validation",
            Phase::MarketAnalysis => "Market, Competition & Risk Analysis",
            Phase::BusinessModeling => "Business Modeling",
            Phase::Branding => "Branding & Identity",
            Phase::ProductDevelopment => "Product Development",
            Phase::MarketingSales => "Marketing & Sales Strategy",
            Phase::Organization => "Organization, Operations & Financials",
            Phase::FinalOutputs => "Final Outputs & Fundraising",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// How a stage obtains its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Awaits a free-text user answer.
    Interactive,
    /// Answer produced by the generator on entry; the machine moves on by itself.
    AutoGenerated,
    /// Phase checkpoint; parks the machine until the section gate is passed.
    Summary,
}

/// One row of the stage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSpec {
    pub stage: Stage,
    pub id: &'static str,
    pub phase: Option<Phase>,
    pub kind: StageKind,
    pub data_key: Option<&'static str>,
}

impl StageSpec {
    const fn sentinel(stage: Stage, id: &'static str) -> Self {
        Self {
            stage,
            id,
            phase: None,
            kind: StageKind::Interactive,
            data_key: None,
        }
    }

    const fn topic(
        stage: Stage,
        id: &'static str,
        phase: Phase,
        kind: StageKind,
        data_key: &'static str,
    ) -> Self {
        Self {
            stage,
            id,
            phase: Some(phase),
            kind,
            data_key: Some(data_key),
        }
    }
}

macro_rules! stage_table {
    (
        $(
            $phase:ident {
                $( $variant:ident => $id:literal, $kind:ident, $key:literal; )+
            }
        )+
    ) => {
        /// One topic of the interview, plus the `Initial`/`Complete` sentinels.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Stage {
            Initial,
            $( $( $variant, )+ )+
            Complete,
        }

        pub(crate) static STAGE_TABLE: &[StageSpec] = &[
            StageSpec::sentinel(Stage::Initial, "INITIAL"),
            $( $(
                StageSpec::topic(Stage::$variant, $id, Phase::$phase, StageKind::$kind, $key),
            )+ )+
            StageSpec::sentinel(Stage::Complete, "COMPLETE"),
        ];
    };
}

stage_table! {
    CoreConcept {
        IdeaTitle => "IDEA_TITLE", Interactive, "idea_title";
        ElevatorPitch => "ELEVATOR_PITCH", Interactive, "elevator_pitch";
        ExecutiveSummary => "EXECUTIVE_SUMMARY", Interactive, "executive_summary";
        ProblemDescription => "PROBLEM_DESCRIPTION", Interactive, "problem_description";
        ProblemMagnitude => "PROBLEM_MAGNITUDE", Interactive, "problem_magnitude";
        CurrentSolutions => "CURRENT_SOLUTIONS", Interactive, "current_solutions";
        CustomerSegments => "CUSTOMER_SEGMENTS", Interactive, "customer_segments";
        EarlyAdopterPersona => "EARLY_ADOPTER_PERSONA", Interactive, "early_adopter_persona";
        ProductDescription => "PRODUCT_DESCRIPTION", Interactive, "product_description";
        HowItWorks => "HOW_IT_WORKS", Interactive, "core_features";
        UvpStatement => "UVP_STATEMENT", Interactive, "uvp_statement";
        UnfairAdvantage => "UNFAIR_ADVANTAGE", Interactive, "unfair_advantage";
        ValidationSummary => "VALIDATION_SUMMARY", Summary, "validation_summary";
    }
    MarketAnalysis {
        BusinessGoalsTimeline => "BUSINESS_GOALS_TIMELINE", Interactive, "business_goals";
        MarketAnalysisSize => "MARKET_ANALYSIS_SIZE", Interactive, "marketAnalysis_size";
        MarketAnalysisTrends => "MARKET_ANALYSIS_TRENDS", Interactive, "marketAnalysis_trends";
        MarketAnalysisOppThreats => "MARKET_ANALYSIS_OPP_THREATS", AutoGenerated, "marketAnalysis_oppThreats";
        MarketAnalysisCompetitorIdentification => "MARKET_ANALYSIS_COMPETITOR_IDENTIFICATION", Interactive, "marketAnalysis_competitor_list";
        MarketAnalysisCompetitorAnalysis => "MARKET_ANALYSIS_COMPETITOR_ANALYSIS", AutoGenerated, "marketAnalysis_competitors";
        MarketAnalysisSwotStrengths => "MARKET_ANALYSIS_SWOT_STRENGTHS", Interactive, "marketAnalysis_swot";
        MarketAnalysisSwotWeaknesses => "MARKET_ANALYSIS_SWOT_WEAKNESSES", Interactive, "marketAnalysis_swot";
        MarketAnalysisSwotOpportunities => "MARKET_ANALYSIS_SWOT_OPPORTUNITIES", Interactive, "marketAnalysis_swot";
        MarketAnalysisSwotThreats => "MARKET_ANALYSIS_SWOT_THREATS", Interactive, "marketAnalysis_swot";
        MarketAnalysisRiskIdentification => "MARKET_ANALYSIS_RISK_IDENTIFICATION", Interactive, "marketAnalysis_identified_risks";
        MarketAnalysisRiskMitigation => "MARKET_ANALYSIS_RISK_MITIGATION", AutoGenerated, "marketAnalysis_risk_analysis";
        MarketAnalysisSummary => "MARKET_ANALYSIS_SUMMARY", Summary, "marketAnalysisSummary";
    }
    BusinessModeling {
        BmcCustomerSegments => "BMC_CUSTOMER_SEGMENTS", Interactive, "bmc_customerSegments";
        BmcValuePropositions => "BMC_VALUE_PROPOSITIONS", AutoGenerated, "bmc_valuePropositions";
        BmcChannels => "BMC_CHANNELS", Interactive, "bmc_channels";
        BmcCustomerRelationships => "BMC_CUSTOMER_RELATIONSHIPS", Interactive, "bmc_customerRelationships";
        BmcRevenueStreams => "BMC_REVENUE_STREAMS", Interactive, "bmc_revenueStreams";
        BmcKeyActivities => "BMC_KEY_ACTIVITIES", AutoGenerated, "bmc_keyActivities";
        BmcKeyResources => "BMC_KEY_RESOURCES", AutoGenerated, "bmc_keyResources";
        BmcKeyPartnerships => "BMC_KEY_PARTNERSHIPS", Interactive, "bmc_keyPartnerships";
        BmcCostStructure => "BMC_COST_STRUCTURE", AutoGenerated, "bmc_costStructure";
        BusinessModelingSummary => "BUSINESS_MODELING_SUMMARY", Summary, "businessModelingSummary";
    }
    Branding {
        BrandingVision => "BRANDING_VISION", Interactive, "branding_vision";
        BrandingMission => "BRANDING_MISSION", Interactive, "branding_mission";
        BrandingCoreValues => "BRANDING_CORE_VALUES", Interactive, "branding_coreValues";
        BrandingPersonality => "BRANDING_PERSONALITY", Interactive, "branding_personality";
        BrandingPositioning => "BRANDING_POSITIONING", Interactive, "branding_positioning";
        BrandingName => "BRANDING_NAME", Interactive, "branding_name";
        BrandingTagline => "BRANDING_TAGLINE", Interactive, "branding_tagline";
        BrandingToneOfVoice => "BRANDING_TONE_OF_VOICE", Interactive, "branding_toneOfVoice";
        BrandingKeyMessages => "BRANDING_KEY_MESSAGES", Interactive, "branding_keyMessages";
        BrandingLogo => "BRANDING_LOGO", Interactive, "branding_logo";
        BrandingColorPalette => "BRANDING_COLOR_PALETTE", Interactive, "branding_colorPalette";
        BrandingTypography => "BRANDING_TYPOGRAPHY", Interactive, "branding_typography";
        BrandingVisualStyle => "BRANDING_VISUAL_STYLE", Interactive, "branding_visualStyle";
        BrandingGuidelines => "BRANDING_GUIDELINES", Summary, "branding_guidelines";
    }
    ProductDevelopment {
        ProductDevCoreFeatures => "PRODUCT_DEV_CORE_FEATURES", Interactive, "productDev_coreFeatures";
        ProductDevUserBenefits => "PRODUCT_DEV_USER_BENEFITS", Interactive, "productDev_userBenefits";
        ProductDevDifferentiators => "PRODUCT_DEV_DIFFERENTIATORS", Interactive, "productDev_differentiators";
        ProductDevMvpDefinition => "PRODUCT_DEV_MVP_DEFINITION", Interactive, "productDev_mvpDefinition";
        ProductDevMvpPhases => "PRODUCT_DEV_MVP_PHASES", Interactive, "productDev_mvpPhases";
        ProductDevMvpTechStack => "PRODUCT_DEV_MVP_TECH_STACK", Interactive, "productDev_mvpTechStack";
        ProductDevMvpDataModel => "PRODUCT_DEV_MVP_DATA_MODEL", Interactive, "productDev_mvpDataModel";
        ProductDevMvpUserFlow => "PRODUCT_DEV_MVP_USER_FLOW", Interactive, "productDev_mvpUserFlow";
        ProductDevMvpResources => "PRODUCT_DEV_MVP_RESOURCES", Interactive, "productDev_mvpResources";
        ProductDevSummary => "PRODUCT_DEV_SUMMARY", Summary, "productDevSummary";
    }
    MarketingSales {
        MarketingObjectives => "MARKETING_OBJECTIVES", Interactive, "marketing_objectives";
        MarketingStrategyContent => "MARKETING_STRATEGY_CONTENT", Interactive, "marketing_strategy_content";
        MarketingStrategySeo => "MARKETING_STRATEGY_SEO", Interactive, "marketing_strategy_seo";
        MarketingStrategySmm => "MARKETING_STRATEGY_SMM", Interactive, "marketing_strategy_smm";
        MarketingStrategyPaidAds => "MARKETING_STRATEGY_PAID_ADS", Interactive, "marketing_strategy_paid_ads";
        MarketingStrategyEmail => "MARKETING_STRATEGY_EMAIL", Interactive, "marketing_strategy_email";
        MarketingStrategyPr => "MARKETING_STRATEGY_PR", Interactive, "marketing_strategy_pr";
        MarketingStrategyInfluencer => "MARKETING_STRATEGY_INFLUENCER", Interactive, "marketing_strategy_influencer";
        SalesStrategyChannels => "SALES_STRATEGY_CHANNELS", Interactive, "sales_strategy_channels";
        SalesStrategyProcess => "SALES_STRATEGY_PROCESS", Interactive, "sales_strategy_process";
        InitialCampaignPlanning => "INITIAL_CAMPAIGN_PLANNING", AutoGenerated, "initial_campaigns";
        MarketingMeasurementKpis => "MARKETING_MEASUREMENT_KPIS", Interactive, "marketing_kpis";
        MarketingMeasurementTools => "MARKETING_MEASUREMENT_TOOLS", Interactive, "marketing_tools";
        MarketingMeasurement => "MARKETING_MEASUREMENT", AutoGenerated, "marketing_measurement";
        MarketingSummary => "MARKETING_SUMMARY", Summary, "marketingSummary";
    }
    Organization {
        OrganizationLegalTeam => "ORGANIZATION_LEGAL_TEAM", Interactive, "org_team";
        OrganizationLegalAgreement => "ORGANIZATION_LEGAL_AGREEMENT", Interactive, "org_agreement";
        OrganizationLegalStructure => "ORGANIZATION_LEGAL_STRUCTURE", Interactive, "org_structure";
        OrganizationLegalIp => "ORGANIZATION_LEGAL_IP", Interactive, "org_ip";
        OrganizationLegalTerms => "ORGANIZATION_LEGAL_TERMS", Interactive, "org_terms";
        OrganizationLegalCompliance => "ORGANIZATION_LEGAL_COMPLIANCE", Interactive, "org_compliance";
        OrganizationManagementLegal => "ORGANIZATION_MANAGEMENT_LEGAL", AutoGenerated, "org_managementLegal";
        OrganizationCompanySummary => "ORGANIZATION_COMPANY_SUMMARY", AutoGenerated, "org_companyDescription";
        OrganizationOperationsDailyProcesses => "ORGANIZATION_OPERATIONS_DAILY_PROCESSES", Interactive, "org_ops_dailyProcesses";
        OrganizationOperationsProductRoadmap => "ORGANIZATION_OPERATIONS_PRODUCT_ROADMAP", Interactive, "org_ops_productRoadmap";
        OrganizationOperationalPlan => "ORGANIZATION_OPERATIONAL_PLAN", AutoGenerated, "org_operationalPlan";
        OrganizationFinancialsAssumptions => "ORGANIZATION_FINANCIALS_ASSUMPTIONS", Interactive, "org_financials_assumptions";
        OrganizationFinancialsSalesForecast => "ORGANIZATION_FINANCIALS_SALES_FORECAST", Interactive, "org_financials_sales_forecast";
        OrganizationFinancialsPnl => "ORGANIZATION_FINANCIALS_PNL", Interactive, "org_financials_pnl";
        OrganizationFinancialsCashFlow => "ORGANIZATION_FINANCIALS_CASH_FLOW", Interactive, "org_financials_cash_flow";
        OrganizationFinancialsBreakEven => "ORGANIZATION_FINANCIALS_BREAK_EVEN", Interactive, "org_financials_break_even";
        OrganizationFinancialsFundingNeeds => "ORGANIZATION_FINANCIALS_FUNDING_NEEDS", Interactive, "org_financials_funding_needs";
        OrganizationFinancialProjections => "ORGANIZATION_FINANCIAL_PROJECTIONS", AutoGenerated, "org_financialProjections";
        OrganizationSummary => "ORGANIZATION_SUMMARY", Summary, "orgSummary";
    }
    FinalOutputs {
        FundingRequest => "FUNDING_REQUEST", AutoGenerated, "final_fundingRequest";
        ComprehensiveBusinessPlan => "COMPREHENSIVE_BUSINESS_PLAN", AutoGenerated, "final_businessPlan";
        InvestorPitchDeck => "INVESTOR_PITCH_DECK", AutoGenerated, "final_pitchDeck";
        Appendices => "APPENDICES", Interactive, "final_appendices";
        FinalOutputsSummary => "FINAL_OUTPUTS_SUMMARY", Summary, "finalOutputsSummary";
    }
}

impl Stage {
    /// The table row describing this stage.
    pub fn spec(self) -> &'static StageSpec {
        // Table rows are emitted in enum declaration order.
        &STAGE_TABLE[self as usize]
    }

    /// Symbolic identifier, as persisted and sent over the wire.
    pub fn as_str(self) -> &'static str {
        self.spec().id
    }

    pub fn is_sentinel(self) -> bool {
        matches!(self, Stage::Initial | Stage::Complete)
    }

    /// Leading `_`-separated segment of the identifier (`MARKET` for
    /// `MARKET_ANALYSIS_SUMMARY`), used to label phase summaries.
    pub fn section_prefix(self) -> &'static str {
        let id = self.as_str();
        id.split('_').next().unwrap_or(id)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGE_TABLE
            .iter()
            .find(|spec| spec.id == s)
            .map(|spec| spec.stage)
            .ok_or_else(|| ValidationError::invalid_format("stage", format!("unknown stage '{}'", s)))
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Stage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
