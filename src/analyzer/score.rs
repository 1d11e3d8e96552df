//! Weighted-bucket heuristic mapping the wallet summary to a 0-100
//! "degen" score. A consumer of the core's output, not part of it.

use crate::model::WalletSummary;

pub fn degen_score(summary: &WalletSummary) -> u8 {
    let mut score: i32 = 0;

    // Trading frequency
    score += match summary.trade_count {
        t if t > 500 => 15,
        t if t > 200 => 12,
        t if t > 50 => 8,
        t if t > 10 => 4,
        _ => 0,
    };

    // Token diversity
    score += match summary.tokens_traded {
        t if t > 200 => 15,
        t if t > 100 => 12,
        t if t > 30 => 8,
        t if t > 10 => 4,
        _ => 0,
    };

    let rate = |count: usize| {
        if summary.tokens_traded > 0 {
            count as f64 / summary.tokens_traded as f64
        } else {
            0.0
        }
    };

    let rug_rate = rate(summary.rugged_tokens);
    score += match rug_rate {
        r if r > 0.7 => 15,
        r if r > 0.5 => 12,
        r if r > 0.3 => 8,
        r if r > 0.1 => 4,
        _ => 0,
    };

    let paper_rate = rate(summary.paper_hands_count);
    score += match paper_rate {
        r if r > 0.5 => 10,
        r if r > 0.3 => 7,
        r if r > 0.1 => 4,
        _ => 0,
    };

    score += match summary.night_trades_pct {
        p if p > 40.0 => 10,
        p if p > 25.0 => 7,
        p if p > 10.0 => 4,
        _ => 0,
    };

    score += match summary.avg_hold_time_minutes {
        m if m < 10.0 => 10,
        m if m < 60.0 => 7,
        m if m < 360.0 => 4,
        _ => 0,
    };

    score += match summary.avg_token_age_at_buy_hours {
        h if h < 1.0 => 10,
        h if h < 6.0 => 7,
        h if h < 24.0 => 4,
        _ => 0,
    };

    score += match summary.active_days {
        d if d > 60 => 5,
        d if d > 30 => 3,
        d if d > 7 => 1,
        _ => 0,
    };

    // Bonus points
    if summary.pnl_percent < -50.0 && summary.win_rate < 30.0 {
        score += 5;
    }
    if summary.rugged_tokens > 10 {
        score += 5;
    }
    if summary.diamond_hands_count > 10 {
        score -= 5;
    }

    score.clamp(0, 100) as u8
}

pub fn degen_title(score: u8) -> (&'static str, &'static str) {
    match score {
        90..=100 => ("Legendary Degen", "You ARE the rug pull"),
        80..=89 => ("Terminal Degen", "Your wallet needs therapy"),
        70..=79 => ("Hardcore Degen", "Sleep is for the weak"),
        60..=69 => ("Active Degen", "Casino with extra steps"),
        50..=59 => ("Semi-Degen", "One foot in the abyss"),
        40..=49 => ("Casual Degen", "Pretends to DYOR first"),
        30..=39 => ("Curious Normie", "Still reads whitepapers"),
        20..=29 => ("Cautious", "Probably DCA-ing into BTC"),
        10..=19 => ("Conservative", "Your mom would approve"),
        _ => ("NPC", "Do you even crypto?"),
    }
}
