//! Instruction templates, one per analytical task.

use chrono::{DateTime, FixedOffset, NaiveDate};

use super::task::{BottomUpMode, BulletinKind};

pub fn morning_brief(date: NaiveDate) -> String {
    format!(
        r#"Generate a high-fidelity Institutional Morning Brief for the Indian Stock Market for {}.

CONTEXT:
- Global Cues: US Indices, Brent Crude, GIFT Nifty.
- Domestic: FII/DII flow trends.
- Key Sector: One sector with high relative strength today.
- Tickers to Watch: 3 tickers with specific news/technical triggers.

Tone: Professional, sovereign intelligence style."#,
        date.format("%d %b %Y")
    )
}

pub const IPO_SCAN: &str = r#"Act as an Institutional IPO Analyst.
SEARCH TASK: Identify ONLY "Live" (currently open for subscription) and "Upcoming" (announced but not yet open) Mainboard IPOs in India.
DO NOT include already listed companies.

DATA SOURCES: Prioritize latest GMP from IPOpremium, Chittorgarh, and IPOfactor.

For each identified IPO, provide:
1. Company Name.
2. Status (LIVE or UPCOMING).
3. Open/Close Dates.
4. Price Band.
5. Lot Size.
6. Current GMP (Grey Market Premium) value.
7. Estimated Listing Gain percentage.
8. Institutional Suggestion (APPLY / AVOID / MAYBE).
9. Brief Fundamental Audit.

Return the results as a JSON object with a key 'ipoList' containing an array of objects."#;

pub fn ipo_deep_dive(company: &str) -> String {
    format!(
        r#"Conduct an exhaustive Institutional IPO Prospectus Audit for "{company}".
Search for:
- Latest RHP (Red Herring Prospectus) summaries.
- GMP trends from IPOpremium and Chittorgarh.
- Financial health (Revenue growth, PAT margins, Debt).
- Valuation (P/E ratio vs Peers).
- Risk factors and Promoter background.

Structure the report in high-fidelity "Black and White" professional wording suitable for a formal print prospectus.
Include sections:
# I. INVESTMENT SUMMARY & FINAL VERDICT
# II. BUSINESS MODEL & COMPETITIVE MOAT
# III. KEY FINANCIAL PERFORMANCE METRICS (3-YEAR TREND)
# IV. VALUATION BENCHMARKING VS INDUSTRY PEERS
# V. MATERIAL RISK FACTORS & GOVERNANCE AUDIT
# VI. GREY MARKET SENTIMENT & LISTING DAY PROJECTION

Tone: Neutral, extremely professional, strictly data-driven, black-and-white print style."#
    )
}

pub const TOP_DOWN: &str = r#"Perform an Institutional Top-Down Equity Research for the Indian Market.

PHASE 1: MACRO SCAN (GDP, Repo Rates, Global Liquidity).
PHASE 2: SECTORAL SELECTION (Focus on ROIC and Capital Flows).
PHASE 3: EQUITY OPPORTUNITIES (3 High-Conviction Stocks).

Output MUST be JSON."#;

pub fn company_deep_dive(company: &str) -> String {
    format!(
        r#"Conduct a rigorous Institutional Forensic & TECHNICAL Audit for "{company}".

YOU MUST INCLUDE THESE SECTIONS FOR THE PDF REPORT:

# I. CORPORATE FORENSIC AUDIT
- Earnings Quality (Cash Flow vs PAT).
- Capital Allocation Efficiency (ROIC vs WACC).
- Governance & Auditor Integrity.

# II. ADVANCED TECHNICAL PARAMETERS (CRITICAL)
- CURRENT PRICE ACTION: Key support at [Value] and resistance at [Value].
- MOMENTUM PROFILE: Detailed RSI(14) reading, ADX strength, and MACD divergence status.
- VOLUME ANALYSIS: Recent delivery % vs historical averages.
- MOVING AVERAGES: Positioning relative to 50 & 200 DMA.

# III. INSTITUTIONAL ALPHA VERDICT
- Risk/Reward Delta.
- Final Sovereign Conviction Rating.

Use professional Markdown. This is for high-stakes PDF export."#
    )
}

pub fn bottom_up(query: &str, mode: BottomUpMode) -> String {
    let subject = match mode {
        BottomUpMode::Entity => query.to_string(),
        BottomUpMode::NewsImpact => format!("the market impact of this news: {}", query),
    };
    format!(
        "Perform a Sovereign-Grade Bottom-Up and Technical Analysis on {}. Include explicit Technical momentum (RSI, Moving Averages) and Fundamental Moat analysis.",
        subject
    )
}

pub fn bulletin(kind: BulletinKind, issued_at: DateTime<FixedOffset>) -> String {
    match kind {
        BulletinKind::PreMarket => PRE_MARKET.to_string(),
        BulletinKind::SwingSignal => SWING_SIGNAL.to_string(),
        BulletinKind::FundamentalPick => FUNDAMENTAL_PICK.to_string(),
        BulletinKind::MarketSnapshot => {
            let stamp = issued_at.format("%I:%M %p IST");
            format!(
                r#"Generate a quick Market Snapshot for Indian markets at {stamp}:

**Market Snapshot**
{stamp}

**Index Status**:
- Nifty 50: [trending/ranging/selling]
- Sensex: [current bias]
- Bank Nifty: [sectoral trend]

**Sector Rotation**:
- Strongest: [sector name]
- Weakest: [sector name]

**Market Sentiment**: [Bullish/Bearish/Sideways]

**Next Watch**:
- Support: [key level]
- Resistance: [key level]
- What to watch: [catalyst/event]

Keep it under 150 words, crisp and actionable."#
            )
        }
        BulletinKind::PostMarket => POST_MARKET.to_string(),
    }
}

const PRE_MARKET: &str = r#"You are a financial analyst for Indian markets. Generate a Pre-Market News brief:

**Daily Market Update (India)**

### Top Market News (Today)
1. [Breaking news about Nifty 50 / Sensex / major stocks]
2. [FII/DII activity or global market impact]
3. [Sector-specific news affecting Indian markets]

### AI Impact Analysis
- **Bullish Sectors**: [Which sectors benefit and why]
- **Bearish Sectors**: [Which sectors face headwinds]
- **Key Stocks to Watch**: [3-4 stocks with reasoning]

### Trading Sentiment
**Opening Outlook**: [Bullish/Bearish/Mixed]
**Key Factors**: [What's driving market today]

Keep it actionable for Indian NSE/BSE traders."#;

const SWING_SIGNAL: &str = r#"Generate an AI Swing Trade Signal for NSE stocks:

**AI Swing Trade Signal**

**Stock**: [Pick a top NSE stock - Nifty 50]
**Sector**: [Technology/Banking/Auto/Pharma etc]

**Technical Setup**:
- Timeframe: Intraday to 3-day swing
- RSI: [Level] - [Bullish/Bearish/Neutral]
- MACD: [Signal - crossover status]
- Moving Averages: [EMA 20/50 alignment]

**Entry Strategy**:
- **Buy Above**: Rs [price] (confirmation level)
- **Stop Loss**: Rs [price] ([X]% risk)
- **Target 1**: Rs [price] ([X]% gain)
- **Target 2**: Rs [price] ([X]% gain)
- **Risk-Reward**: 1:3+

**Support/Resistance**:
- Support: Rs [level 1], Rs [level 2]
- Resistance: Rs [level 1], Rs [level 2]

**Volume Confirmation**: Check for above-average volume on entry

*Educational purposes only. Not financial advice.*"#;

const FUNDAMENTAL_PICK: &str = r#"Generate a Fundamental Stock Pick for long-term investors:

**Fundamental Stock Pick**

**Stock**: [Indian company name] (NSE: [TICKER])
**Investment Horizon**: 3-5 Years
**Current Price**: Rs [estimate]

**Key Metrics**:
- P/E Ratio: [value]
- ROE: [%]
- Debt-to-Equity: [ratio]
- Revenue Growth (YoY): [%]

**Investment Thesis**:
1. **Sector Tailwinds**: [Why this sector is growing]
2. **Competitive Advantage**: [Company's unique strengths]
3. **Growth Drivers**: [3 factors driving future growth]
4. **Valuation**: [Fair/Undervalued/Overvalued - justify]

**Risk Factors**:
- [Market/Economic risk]
- [Company-specific risk]

**Target Entry**: Below Rs [price]

*Research-based analysis for educational purposes.*"#;

const POST_MARKET: &str = r#"Generate comprehensive Post-Market Analysis:

**Post-Market Analysis**

**Market Summary**:
- Nifty 50: [Close] ([+/-]X%)
- Sensex: [Close] ([+/-]X%)
- Market Breadth: [Adv/Dec ratio]

**Top Gainers**:
1. [Stock]: +[X]% - [brief reason]
2. [Stock]: +[X]%
3. [Stock]: +[X]%

**Top Losers**:
1. [Stock]: -[X]% - [brief reason]
2. [Stock]: -[X]%

**Sector Performance**:
- Winners: [Sector 1], [Sector 2]
- Losers: [Sector 3], [Sector 4]

**Tomorrow's Roadmap**:
- Global Cues: [US/Asia markets]
- Key Events: [Earnings/Economic data]
- Technical View: [Support/Resistance]

**Key Levels for Tomorrow**:
- Nifty: Support [X] | Resistance [X]
- Sensex: Support [X] | Resistance [X]"#;
