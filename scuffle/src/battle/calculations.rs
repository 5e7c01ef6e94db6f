use scuffle_data::{
    Boost,
    Nature,
    Stat,
    StatTable,
};

use crate::config::MonData;

/// Calculates a battler's stats from its species' base stats and its team entry.
pub fn calculate_mon_stats(base_stats: &StatTable, mon: &MonData) -> StatTable {
    let mut stats = StatTable::default();
    let level = mon.level as u32;
    for stat in Stat::ALL {
        let value = 2 * base_stats.get(stat) as u32
            + mon.ivs.get(stat) as u32
            + mon.evs.get(stat) as u32 / 4;
        let value = value * level / 100;
        let value = if stat == Stat::HP {
            value + level + 10
        } else {
            value + 5
        };
        stats.set(stat, value.min(u16::MAX as u32) as u16);
    }
    apply_nature_to_stats(stats, mon.nature)
}

/// Applies a nature to a stat table.
pub fn apply_nature_to_stats(mut stats: StatTable, nature: Nature) -> StatTable {
    for stat in [nature.raises(), nature.lowers()] {
        let value = nature.multiplier(stat).apply(stats.get(stat) as u64);
        stats.set(stat, value as u16);
    }
    stats
}

/// Applies a stat stage to a stat value.
pub fn boosted_stat(value: u64, stage: i8) -> u64 {
    Boost::stat_multiplier(stage).apply(value)
}

#[cfg(test)]
mod calculations_test {
    use pretty_assertions::assert_eq;
    use scuffle_data::{
        Nature,
        StatTable,
    };

    use crate::{
        battle::{
            apply_nature_to_stats,
            boosted_stat,
            calculate_mon_stats,
        },
        config::MonData,
    };

    fn mon(level: u8, nature: Nature) -> MonData {
        MonData {
            name: "Test".to_owned(),
            species: "Test".to_owned(),
            ability: None,
            item: None,
            moves: Vec::new(),
            level,
            nature,
            ivs: StatTable::uniform(31),
            evs: StatTable::default(),
        }
    }

    #[test]
    fn nature_raises_and_lowers_ten_percent() {
        let stats = apply_nature_to_stats(StatTable::uniform(100), Nature::Adamant);
        assert_eq!(stats.atk, 110);
        assert_eq!(stats.spa, 90);
        assert_eq!(stats.def, 100);
        assert_eq!(stats.hp, 100);
    }

    #[test]
    fn neutral_nature_changes_nothing() {
        let stats = apply_nature_to_stats(StatTable::uniform(100), Nature::Hardy);
        assert_eq!(stats, StatTable::uniform(100));
    }

    #[test]
    fn calculates_level_100_stats() {
        let base = StatTable {
            hp: 35,
            atk: 55,
            def: 40,
            spa: 50,
            spd: 50,
            spe: 90,
        };
        let stats = calculate_mon_stats(&base, &mon(100, Nature::Hardy));
        assert_eq!(
            stats,
            StatTable {
                hp: 211,
                atk: 146,
                def: 116,
                spa: 136,
                spd: 136,
                spe: 216,
            }
        );
    }

    #[test]
    fn calculates_level_50_stats_with_nature() {
        let base = StatTable::uniform(100);
        let stats = calculate_mon_stats(&base, &mon(50, Nature::Timid));
        // (200 + 31) * 50 / 100 = 115.
        assert_eq!(stats.hp, 175);
        assert_eq!(stats.spe, 132);
        assert_eq!(stats.atk, 108);
        assert_eq!(stats.def, 120);
    }

    #[test]
    fn applies_stat_stages() {
        assert_eq!(boosted_stat(100, 0), 100);
        assert_eq!(boosted_stat(100, 1), 150);
        assert_eq!(boosted_stat(100, -1), 66);
        assert_eq!(boosted_stat(100, 6), 400);
        assert_eq!(boosted_stat(100, -6), 25);
    }
}
