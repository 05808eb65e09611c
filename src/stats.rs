use crate::columns::{
    ALSKAR, BONUS_DELTAGIT, Columns, DP_COLUMNS, ECONOMY_COLUMNS, HAK_SEK, HAND_SEK, HANDER_AKTIV,
    INTAKT_KANNER, MAN, NILS, PERSONAL_DELTAGIT, PRENUMERANTER, SOVER_MED, SUMMA_TID_SEK, SVARTA,
    TID_D_SEK, TOTALT_MAN, TPK_SEK, VINST, masked, positive, select, zip_add,
};
use crate::config::{Capacities, ConfigMap};
use crate::models::{Record, Report};
use crate::numeric::{DAYS_PER_YEAR, WEEKS_PER_YEAR, count, div, mean, proj365, sec_to, sum};
use crate::report::ReportBuilder;

const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Builds the full statistics report for `rows`.
///
/// Total over its inputs: missing columns, malformed cells, an empty history
/// and zero denominators all collapse to 0. The emitted labels depend on the
/// configured group labels only, never on the data.
pub fn compute(rows: &[Record], config: &ConfigMap) -> Report {
    let labels = config.group_labels();
    let caps = config.capacities();
    let bonus_pct = config.super_bonus_pct();

    let columns = Columns::new(rows);
    let len = columns.len();
    let n = len as f64;

    let m = columns.get(MAN);
    let s = columns.get(SVARTA);
    let bd = columns.get(BONUS_DELTAGIT);
    let pd = columns.get(PERSONAL_DELTAGIT);
    let p = columns.get(&labels.pappan);
    let g = columns.get(&labels.grannar);
    let nv = columns.get(&labels.nils_vanner);
    let nf = columns.get(&labels.nils_familj);
    let be = columns.get(&labels.bekanta);
    let es = columns.get(&labels.esk);

    let tot_man = if columns.has(TOTALT_MAN) {
        columns.get(TOTALT_MAN)
    } else {
        [&s, &bd, &es, &pd, &p, &g, &nv, &nf, &be]
            .into_iter()
            .fold(m.clone(), |total, part| zip_add(&total, part))
    };

    let alskar = columns.get(ALSKAR);
    let sover = columns.get(SOVER_MED);
    let nils = columns.get(NILS);

    let summa_tid = columns.get(SUMMA_TID_SEK);
    let tid_d = columns.get(TID_D_SEK);
    let tpk = columns.get(TPK_SEK);
    let hand = columns.get(HAND_SEK);
    let hak = columns.get(HAK_SEK);
    let hander_aktiv = columns.get(HANDER_AKTIV);

    let m_pos = positive(&m);
    let s_pos = positive(&s);
    let mask_gb = mask_by(len, |i| m[i] > 0.0 || s[i] > 0.0);
    let mask_privat = mask_by(len, |i| {
        m[i] == 0.0 && (p[i] > 0.0 || g[i] > 0.0 || nv[i] > 0.0 || nf[i] > 0.0)
    });
    let mask_vita = mask_by(len, |i| m[i] > 0.0 && s[i] == 0.0);
    let mask_svarta = mask_by(len, |i| s[i] > 0.0 && m[i] == 0.0);
    let mask_blandat = mask_by(len, |i| m[i] > 0.0 && s[i] > 0.0);

    // Eskilstuna and bonus only count as black on rows with Svarta > 0.
    let es_black = masked(&es, &s_pos);
    let bd_black = masked(&bd, &s_pos);
    let sum_black = sum(&s) + sum(&es_black) + sum(&bd_black);
    let proj_black = proj365(&s) + proj365(&es_black) + proj365(&bd_black);
    let proj_totman = proj365(&tot_man);

    let groups = [
        Group::new(&labels.pappan, &p, Some(caps.pappan)),
        Group::new(&labels.grannar, &g, Some(caps.grannar)),
        Group::new(&labels.nils_vanner, &nv, Some(caps.nils_vanner)),
        Group::new(&labels.nils_familj, &nf, Some(caps.nils_familj)),
        Group::new(&labels.bekanta, &be, Some(caps.bekanta)),
        Group::new(&labels.esk, &es, None),
        Group::new(BONUS_DELTAGIT, &bd, None),
        Group::new(PERSONAL_DELTAGIT, &pd, Some(caps.staff)),
    ];

    let noj = Satisfaction::new(
        &caps,
        SatisfactionInputs {
            alskar: sum(&alskar),
            sover: sum(&sover),
            nils: sum(&nils),
            pappan: sum(&p),
            grannar: sum(&g),
            nils_vanner: sum(&nv),
            nils_familj: sum(&nf),
        },
    );
    let noj_365 = Satisfaction::new(
        &caps,
        SatisfactionInputs {
            alskar: proj365(&alskar),
            sover: proj365(&sover),
            nils: proj365(&nils),
            pappan: proj365(&p),
            grannar: proj365(&g),
            nils_vanner: proj365(&nv),
            nils_familj: proj365(&nf),
        },
    );

    let economy: Vec<(&str, Vec<f64>)> = ECONOMY_COLUMNS
        .iter()
        .map(|name| (*name, columns.get(name)))
        .collect();
    let dp: Vec<(&str, Vec<f64>)> = DP_COLUMNS
        .iter()
        .map(|name| (*name, columns.get(name)))
        .collect();

    // The +1 reserves a slot for Bekanta on top of the four känner groups.
    let kanner_slots = caps.kanner() + 1.0;
    let ik = columns.get(INTAKT_KANNER);
    let vinst = columns.get(VINST);
    let pren = columns.get(PRENUMERANTER);

    let hand_active = positive(&hander_aktiv);
    let aktiva = count(&hand_active) as f64;
    let inaktiva = n - aktiva;
    let tpk_inkl = zip_add(&tpk, &masked(&hand, &hand_active));

    let mut report = ReportBuilder::new();

    report
        .section("Översikt")
        .int("Antal rader", n)
        .real("Totalt antal män (alla fält)", sum(&tot_man))
        .real("Män – summa", sum(&m))
        .int("Antal GB", count(&mask_gb) as f64)
        .int("Antal Privat GB", count(&mask_privat) as f64);

    report
        .section("Svarta")
        .real("Svarta – summa", sum(&s))
        .real("Summa Svarta (inkl. regler)", sum_black)
        .real("Andel Svarta (%)", 100.0 * div(sum_black, sum(&tot_man)));

    report.section("DP/DPP/DAP/TAP");
    for (name, values) in &dp {
        report.real(format!("{name} – summa"), sum(values));
    }

    report
        .section("Älskar & Sover")
        .real("Älskar – summa", sum(&alskar))
        .real("Sover med – summa", sum(&sover))
        .real("Älskar – snitt per känner", noj.alskar_per_kanner)
        .real(
            format!("Sover med – per {}", labels.nils_familj),
            noj.sover_per_nils_familj,
        );

    report.section("Källor");
    for group in &groups {
        report
            .real(format!("{} – summa", group.label), group.total())
            .real(format!("{} – snitt per scen", group.label), group.per_scene())
            .real(format!("{} – antal tillfällen", group.label), group.occasions());
    }

    report
        .section("Händer")
        .int("Händer aktiva", aktiva)
        .int("Händer inaktiva", inaktiva)
        .real("Händer aktiva (%)", 100.0 * div(aktiva, n))
        .real("Händer inaktiva (%)", 100.0 * div(inaktiva, n));

    let summa_tid_sek = sum(&summa_tid);
    report
        .section("Tider")
        .real("Summa tid (h)", sec_to("h", summa_tid_sek))
        .real("Summa tid (d)", sec_to("d", summa_tid_sek))
        .real("Summa tid (v)", sec_to("w", summa_tid_sek))
        .real("Tid D (h)", sec_to("h", sum(&tid_d)))
        .real("Tid per kille (h)", sec_to("h", sum(&tpk)))
        .real("Snitt händer per kille (sek)", mean(&hak));

    report
        .section("Snitt")
        .real(
            "Snitt GB",
            div(sum(&select(&tot_man, &m_pos)), count(&m_pos) as f64),
        )
        .real(
            "Snitt Privat GB",
            div(sum(&select(&tot_man, &mask_privat)), count(&mask_privat) as f64),
        )
        .real(
            "Snitt tid GB (h)",
            div(mean(&select(&summa_tid, &m_pos)), SECONDS_PER_HOUR),
        )
        .real(
            "Snitt tid Privat GB (h)",
            div(mean(&select(&summa_tid, &mask_privat)), SECONDS_PER_HOUR),
        )
        .real("Snitt tid/kille ex händer", mean(&tpk))
        .real("Snitt tid/kille inkl händer", mean(&tpk_inkl));

    report
        .section("Nöjdhet")
        .real(format!("Nöjdhet – {}", labels.pappan), noj.pappan)
        .real(format!("Nöjdhet – {}", labels.grannar), noj.grannar)
        .real(format!("Nöjdhet – {}", labels.nils_vanner), noj.nils_vanner)
        .real(format!("Nöjdhet – {}", labels.nils_familj), noj.nils_familj)
        .real("Nöjdhet – Nils", noj.nils);

    report.section("Ekonomi");
    for (name, values) in &economy {
        report.real(format!("{name} – summa"), sum(values));
    }
    report
        .real("Känner tjänar", div(sum(&ik) + sum(&vinst), kanner_slots))
        .real("Super-bonus ack", sum(&pren) * bonus_pct / 100.0);

    report
        .section("Prognos 365d")
        .real("Totalt antal män – summa (365d)", proj_totman)
        .real("Svarta (inkl. regler) – summa (365d)", proj_black)
        .real("Andel Svarta (%) – 365d", 100.0 * div(proj_black, proj_totman));
    for group in &groups {
        report
            .real(format!("{} – summa (365d)", group.label), proj365(group.values))
            .real(
                format!("{} – snitt per scen (365d)", group.label),
                group.per_scene(),
            );
    }
    for (name, values) in dp.iter().chain(&economy) {
        report.real(format!("{name} – summa (365d)"), proj365(values));
    }
    report
        .real("Älskar – summa (365d)", proj365(&alskar))
        .real("Sover med – summa (365d)", proj365(&sover))
        .real(
            "Känner tjänar (365d)",
            div(proj365(&ik) + proj365(&vinst), kanner_slots),
        )
        .real(
            "Super-bonus ack – prognos (365d)",
            proj365(&pren) * (bonus_pct / 100.0),
        );

    report
        .section("GB (365d)")
        .int("Antal GB (365d)", per_year(&mask_gb, n))
        .int("Antal Privat GB (365d)", per_year(&mask_privat, n))
        .int("Antal GB vita (365d)", per_year(&mask_vita, n))
        .int("Antal GB svarta (365d)", per_year(&mask_svarta, n))
        .int("Antal GB blandat (365d)", per_year(&mask_blandat, n));

    let weekly = noj_365.per_week();
    report
        .section("Prognos Nöjdhet (per vecka)")
        .real(format!("Nöjdhet – {} (per vecka)", labels.pappan), weekly.pappan)
        .real(format!("Nöjdhet – {} (per vecka)", labels.grannar), weekly.grannar)
        .real(
            format!("Nöjdhet – {} (per vecka)", labels.nils_vanner),
            weekly.nils_vanner,
        )
        .real(
            format!("Nöjdhet – {} (per vecka)", labels.nils_familj),
            weekly.nils_familj,
        )
        .real("Nöjdhet – Nils (per vecka)", weekly.nils);

    report.build()
}

fn per_year(mask: &[bool], rows: f64) -> f64 {
    div(count(mask) as f64, rows.max(1.0)) * DAYS_PER_YEAR
}

fn mask_by(len: usize, predicate: impl Fn(usize) -> bool) -> Vec<bool> {
    (0..len).map(predicate).collect()
}

struct Group<'a> {
    label: &'a str,
    values: &'a [f64],
    capacity: Option<f64>,
}

impl<'a> Group<'a> {
    fn new(label: &'a str, values: &'a [f64], capacity: Option<f64>) -> Self {
        Self {
            label,
            values,
            capacity,
        }
    }

    fn total(&self) -> f64 {
        sum(self.values)
    }

    fn per_scene(&self) -> f64 {
        div(self.total(), count(&positive(self.values)) as f64)
    }

    fn occasions(&self) -> f64 {
        match self.capacity {
            Some(capacity) if capacity > 0.0 => div(self.total(), capacity),
            _ => self.total(),
        }
    }
}

struct SatisfactionInputs {
    alskar: f64,
    sover: f64,
    nils: f64,
    pappan: f64,
    grannar: f64,
    nils_vanner: f64,
    nils_familj: f64,
}

#[derive(Debug, Clone, Copy)]
struct Satisfaction {
    alskar_per_kanner: f64,
    sover_per_nils_familj: f64,
    pappan: f64,
    grannar: f64,
    nils_vanner: f64,
    nils_familj: f64,
    nils: f64,
}

impl Satisfaction {
    fn new(caps: &Capacities, inputs: SatisfactionInputs) -> Self {
        let alskar_per_kanner = div(inputs.alskar, caps.kanner());
        let sover_per_nils_familj = div(inputs.sover, caps.nils_familj);
        Self {
            alskar_per_kanner,
            sover_per_nils_familj,
            pappan: alskar_per_kanner + div(inputs.pappan, caps.pappan),
            grannar: alskar_per_kanner + div(inputs.grannar, caps.grannar),
            nils_vanner: alskar_per_kanner + div(inputs.nils_vanner, caps.nils_vanner),
            nils_familj: alskar_per_kanner
                + div(inputs.nils_familj, caps.nils_familj)
                + sover_per_nils_familj,
            nils: inputs.nils,
        }
    }

    fn per_week(self) -> Self {
        Self {
            alskar_per_kanner: self.alskar_per_kanner / WEEKS_PER_YEAR,
            sover_per_nils_familj: self.sover_per_nils_familj / WEEKS_PER_YEAR,
            pappan: self.pappan / WEEKS_PER_YEAR,
            grannar: self.grannar / WEEKS_PER_YEAR,
            nils_vanner: self.nils_vanner / WEEKS_PER_YEAR,
            nils_familj: self.nils_familj / WEEKS_PER_YEAR,
            nils: self.nils / WEEKS_PER_YEAR,
        }
    }
}
