//! Campaign session management.
//!
//! `CampaignSession` owns a ledger store and everything needed to turn
//! player actions into ledger records. Totals are never cached: every
//! operation folds the ledger, reads heat once, and threads that reading
//! through scoring and complication-table selection.

use rand::SeedableRng;
use rand::rngs::StdRng;

use owl_core::export::{ExportFormat, export};
use owl_core::ward::{WARDS, normalize_ward};
use owl_core::{ExposureBreakdown, LedgerRecord, LedgerStore, format_points, saturating};
use owl_mechanics::tier::{RENOWN_PERKS, notoriety_response, unlocked_perks};
use owl_mechanics::{
    Adjustment, Archetype, Execution, HeatReading, Magnitude, MissionInputs, MissionScore,
    OpsFlags, ProgressionTotals, ScoringPolicy, Standing, SteppedPolicy, recompute, score_mission,
};
use owl_wheel::{
    BuiltinOptions, DirOptions, OptionSource, OptionTable, Reconciler, SpinProposal, SpinReceipt,
    WheelError, WheelGeometry, propose_spin,
};

use crate::config::CampaignConfig;
use crate::error::{CampaignError, CampaignResult};

/// A scored mission waiting to be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedMission {
    /// What the player chose.
    pub inputs: MissionInputs,
    /// Score at the time it was previewed.
    pub preview: MissionScore,
}

/// An interactive campaign session over a ledger store.
pub struct CampaignSession<S: LedgerStore> {
    store: S,
    config: CampaignConfig,
    policy: Box<dyn ScoringPolicy>,
    options: Box<dyn OptionSource>,
    reconciler: Reconciler,
    rng: StdRng,
    ward: String,
    last_preview: Option<QueuedMission>,
    queued: Option<QueuedMission>,
}

impl<S: LedgerStore> CampaignSession<S> {
    /// Open a session over `store`, warming the spin dedup cache from the
    /// records already in it.
    pub fn new(store: S, config: CampaignConfig) -> CampaignResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let options: Box<dyn OptionSource> = match &config.tables_dir {
            Some(dir) => Box::new(DirOptions::new(dir.clone())),
            None => Box::new(BuiltinOptions),
        };

        let mut reconciler = Reconciler::new(config.nonce_capacity);
        reconciler.warm_from(&store.read_all()?);

        Ok(Self {
            store,
            ward: config.ward.clone(),
            config,
            policy: Box::new(SteppedPolicy::default()),
            options,
            reconciler,
            rng,
            last_preview: None,
            queued: None,
        })
    }

    /// Replace the scoring tuning.
    pub fn with_policy(mut self, policy: impl ScoringPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Replace the complication table source.
    pub fn with_options(mut self, options: impl OptionSource + 'static) -> Self {
        self.options = Box::new(options);
        self
    }

    /// Get the ledger store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &CampaignConfig {
        &self.config
    }

    /// Get the active ward.
    pub fn ward(&self) -> &str {
        &self.ward
    }

    /// Change the active ward. Blank input is rejected.
    pub fn set_ward(&mut self, ward: &str) -> CampaignResult<&str> {
        let ward = normalize_ward(ward);
        if ward.is_empty() {
            return Err(CampaignError::InvalidChoice(
                "usage: ward <name>".to_string(),
            ));
        }
        self.ward = ward;
        Ok(&self.ward)
    }

    /// Get the queued mission, if any.
    pub fn queued(&self) -> Option<&QueuedMission> {
        self.queued.as_ref()
    }

    /// Every record in the ledger.
    pub fn records(&self) -> CampaignResult<Vec<LedgerRecord>> {
        Ok(self.store.read_all()?)
    }

    /// Current totals, folded from the ledger.
    pub fn totals(&self) -> CampaignResult<ProgressionTotals> {
        Ok(recompute(&self.records()?))
    }

    /// Current heat. Every operation calls this once and passes the result
    /// on, so scoring and table selection always agree.
    pub fn heat(&self) -> CampaignResult<HeatReading> {
        Ok(self.config.heat.read(self.totals()?.notoriety_total))
    }

    /// Current totals, tiers and heat.
    pub fn standing(&self) -> CampaignResult<Standing> {
        Ok(Standing::assess(
            self.totals()?,
            &self.config.renown_ladder,
            &self.config.notoriety_ladder,
            &self.config.heat,
        ))
    }

    /// Score a mission against current heat without recording anything.
    pub fn preview_mission(&mut self, inputs: &MissionInputs) -> CampaignResult<MissionScore> {
        let heat = self.heat()?;
        let score = score_mission(self.policy.as_ref(), inputs, heat);
        log::debug!("previewed {} with {}: {score}", inputs.archetype, self.policy.name());
        self.last_preview = Some(QueuedMission {
            inputs: inputs.clone(),
            preview: score.clone(),
        });
        Ok(score)
    }

    /// Preview a mission and hold it for [`resolve_mission`](Self::resolve_mission).
    /// Replaces any mission already queued.
    pub fn queue_mission(&mut self, inputs: MissionInputs) -> CampaignResult<MissionScore> {
        let score = self.preview_mission(&inputs)?;
        self.queued = self.last_preview.clone();
        Ok(score)
    }

    /// Resolve the queued mission. Notoriety is rescored against the heat
    /// at resolution time, which may differ from the preview. The queue is
    /// kept if the append fails.
    pub fn resolve_mission(&mut self, notes: Option<String>) -> CampaignResult<MissionScore> {
        let inputs = self
            .queued
            .as_ref()
            .map(|q| q.inputs.clone())
            .ok_or(CampaignError::NoQueuedMission)?;
        let (score, _) = self.apply_mission(&inputs, notes)?;
        self.queued = None;
        Ok(score)
    }

    /// Score a mission and append its `MissionResolved` record.
    pub fn apply_mission(
        &mut self,
        inputs: &MissionInputs,
        notes: Option<String>,
    ) -> CampaignResult<(MissionScore, LedgerRecord)> {
        let heat = self.heat()?;
        let score = score_mission(self.policy.as_ref(), inputs, heat);
        let record = LedgerRecord::mission(
            self.ward.clone(),
            score.renown_gain,
            score.notoriety_gain,
            score.to_detail(inputs, notes),
        );
        self.store.append(record.clone())?;
        log::info!(
            "mission {} resolved in {}: renown +{}, notoriety +{}",
            inputs.archetype,
            self.ward,
            format_points(score.renown_gain),
            format_points(score.notoriety_gain)
        );
        Ok((score, record))
    }

    /// Apply a direct adjustment at current heat.
    pub fn adjust(&mut self, adjustment: &Adjustment) -> CampaignResult<LedgerRecord> {
        let heat = self.heat()?;
        let (renown, notoriety) = adjustment.deltas(&heat);
        let record =
            LedgerRecord::adjustment(self.ward.clone(), adjustment.reason(), renown, notoriety);
        self.store.append(record.clone())?;
        log::info!(
            "adjustment '{}' in {}: renown {:+}, notoriety {:+}",
            adjustment.reason(),
            self.ward,
            renown,
            notoriety
        );
        Ok(record)
    }

    /// The complication table for current heat.
    pub fn active_table(&self) -> CampaignResult<OptionTable> {
        let heat = self.heat()?;
        Ok(self.options.load_options(heat.band)?)
    }

    /// Choose a spin the way a client would: locally, before committing.
    pub fn propose_spin(&mut self) -> CampaignResult<(SpinProposal, OptionTable)> {
        let table = self.active_table()?;
        let proposal = propose_spin(table.len(), &mut self.rng)
            .ok_or(WheelError::EmptyTable(table.band()))?;
        Ok((proposal, table))
    }

    /// Commit a client-chosen spin against the current table. A resent
    /// nonce returns its original receipt before any table is loaded.
    pub fn complete_spin(&mut self, chosen_index: usize, nonce: &str) -> CampaignResult<SpinReceipt> {
        if let Some(receipt) = self.reconciler.replay(nonce) {
            return Ok(receipt);
        }
        let table = self.active_table()?;
        Ok(self.reconciler.complete_spin(
            &mut self.store,
            &table,
            &self.ward,
            chosen_index,
            nonce,
        )?)
    }

    /// Let the session choose the index and commit it in one step.
    pub fn draw_spin(&mut self) -> CampaignResult<(SpinProposal, OptionTable, SpinReceipt)> {
        let table = self.active_table()?;
        let (proposal, receipt) =
            self.reconciler
                .draw_spin(&mut self.store, &table, &self.ward, &mut self.rng)?;
        Ok((proposal, table, receipt))
    }

    /// Render the ledger in `format`.
    pub fn export(&self, format: ExportFormat) -> CampaignResult<String> {
        Ok(export(&self.records()?, format)?)
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> CampaignResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "mission" | "preview" => self.do_mission(rest),
            "queue" => self.do_queue(rest),
            "resolve" => self.do_resolve(rest),
            "lie-low" | "lielow" => self.do_adjust(&Adjustment::LieLow),
            "charity" | "proxy" => self.do_adjust(&Adjustment::ProxyCharity),
            "adjust" => self.do_custom_adjust(rest),
            "spin" => self.do_spin(rest),
            "status" => self.do_status(),
            "perks" => self.do_perks(),
            "heat" => self.do_heat(),
            "ledger" => self.do_ledger(),
            "export" => self.do_export(rest),
            "ward" => self.do_ward(rest),
            "help" => self.do_help(rest),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            other => Err(CampaignError::UnknownCommand(other.to_string())),
        }
    }

    fn do_mission(&mut self, rest: &str) -> CampaignResult<String> {
        let inputs = parse_mission(rest)?;
        let score = self.preview_mission(&inputs)?;
        Ok(format!(
            "Preview: {} ({})\n{score}\nHeat: {} (x{})\nType `queue` to queue this mission.",
            inputs.archetype, self.ward, score.heat.band, score.heat.multiplier
        ))
    }

    fn do_queue(&mut self, rest: &str) -> CampaignResult<String> {
        let inputs = if rest.is_empty() {
            self.last_preview
                .as_ref()
                .map(|p| p.inputs.clone())
                .ok_or_else(|| {
                    CampaignError::InvalidChoice(
                        "nothing previewed; usage: queue <mission>".to_string(),
                    )
                })?
        } else {
            parse_mission(rest)?
        };
        let score = self.queue_mission(inputs)?;
        Ok(format!(
            "Queued: {} | projected Renown +{}, Notoriety +{}",
            score.archetype,
            format_points(score.renown_gain),
            format_points(score.notoriety_gain)
        ))
    }

    fn do_resolve(&mut self, notes: &str) -> CampaignResult<String> {
        let notes = (!notes.is_empty()).then(|| notes.to_string());
        let score = self.resolve_mission(notes)?;
        let standing = self.standing()?;
        Ok(format!(
            "Resolved: {} in {}\n{score}\nRenown {} | Notoriety {}",
            score.archetype,
            self.ward,
            format_points(standing.totals.renown_total),
            format_points(standing.totals.notoriety_total)
        ))
    }

    fn do_adjust(&mut self, adjustment: &Adjustment) -> CampaignResult<String> {
        let record = self.adjust(adjustment)?;
        let totals = self.totals()?;
        Ok(format!(
            "{}: Notoriety {:+} -> {}",
            adjustment.reason(),
            record.notoriety_delta,
            format_points(totals.notoriety_total)
        ))
    }

    fn do_custom_adjust(&mut self, rest: &str) -> CampaignResult<String> {
        let usage = || {
            CampaignError::InvalidChoice("usage: adjust <renown> <notoriety> <reason>".to_string())
        };
        let parts: Vec<&str> = rest.splitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(usage());
        }
        let renown: f64 = parts[0].parse().map_err(|_| usage())?;
        let notoriety: f64 = parts[1].parse().map_err(|_| usage())?;
        let reason = parts[2].trim();
        if reason.is_empty() {
            return Err(usage());
        }
        let record = self.adjust(&Adjustment::Custom {
            reason: reason.to_string(),
            renown,
            notoriety,
        })?;
        Ok(format!(
            "{reason}: Renown {:+}, Notoriety {:+}",
            record.renown_delta, record.notoriety_delta
        ))
    }

    fn do_spin(&mut self, rest: &str) -> CampaignResult<String> {
        let (receipt, landing) = if rest.is_empty() {
            let (proposal, table, receipt) = self.draw_spin()?;
            let angle = proposal.target_angle(table.len());
            (receipt, Some(angle))
        } else {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            let index = parts
                .first()
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| {
                    CampaignError::InvalidChoice("usage: spin [<index> <nonce>]".to_string())
                })?;
            let nonce = parts.get(1).copied().unwrap_or("");
            (self.complete_spin(index, nonce)?, None)
        };

        let mut out = format!(
            "Complication ({} heat, #{} of {}): {}",
            receipt.drawn.band,
            receipt.drawn.index + 1,
            receipt.drawn.option_count,
            receipt.drawn.text
        );
        if let Some(angle) = landing {
            let segment = WheelGeometry::new(receipt.drawn.option_count).segment_degrees();
            out.push_str(&format!(
                "\n  Wheel: {segment:.1} deg segments, lands at {angle:.1} deg"
            ));
        }
        if receipt.replayed {
            out.push_str("\n  (already recorded; nothing new written)");
        }
        Ok(out)
    }

    fn do_status(&self) -> CampaignResult<String> {
        let s = self.standing()?;
        let response = notoriety_response(s.notoriety_tier);
        let mut out = format!("Ward: {}\n", self.ward);
        out.push_str(&format!(
            "Renown: {} (tier {}, {})\n",
            format_points(s.totals.renown_total),
            s.renown_tier,
            s.renown_next
        ));
        out.push_str(&format!(
            "Notoriety: {} (tier {}, {}) {} {}\n",
            format_points(s.totals.notoriety_total),
            s.notoriety_tier,
            s.notoriety_next,
            response.code,
            response.name
        ));
        out.push_str(&format!("Heat: {} (x{})\n", s.heat.band, s.heat.multiplier));
        match &self.queued {
            Some(q) => out.push_str(&format!("Queued: {}\n", q.inputs.archetype)),
            None => out.push_str("Queued: none\n"),
        }
        out.push_str(&format!("Ledger: {} records", self.store.len()?));
        Ok(out)
    }

    fn do_perks(&self) -> CampaignResult<String> {
        let s = self.standing()?;
        let unlocked = unlocked_perks(s.renown_tier);
        let mut out = if unlocked.is_empty() {
            "No perks unlocked yet.\n".to_string()
        } else {
            let mut out = format!("Unlocked perks ({}):\n", unlocked.len());
            for p in unlocked {
                out.push_str(&format!("  {} {}: {}\n", p.code, p.name, p.text));
            }
            out
        };
        match RENOWN_PERKS.get(unlocked.len()) {
            Some(next) => out.push_str(&format!(
                "Next: {} {} ({})",
                next.code, next.name, s.renown_next
            )),
            None => out.push_str("All perks unlocked."),
        }
        Ok(out)
    }

    fn do_heat(&self) -> CampaignResult<String> {
        let s = self.standing()?;
        let response = notoriety_response(s.notoriety_tier);
        Ok(format!(
            "Notoriety {} -> {} heat (x{})\n{} {}: {}",
            format_points(s.totals.notoriety_total),
            s.heat.band,
            s.heat.multiplier,
            response.code,
            response.name,
            response.text
        ))
    }

    fn do_ledger(&self) -> CampaignResult<String> {
        let records = self.records()?;
        if records.is_empty() {
            return Ok("Ledger is empty.".to_string());
        }
        let start = records.len().saturating_sub(10);
        let recent = &records[start..];
        let mut out = format!(
            "Ledger ({} records, showing last {}):\n\n",
            records.len(),
            recent.len()
        );
        out.push_str(&owl_core::export::export_text(recent));
        Ok(out.trim_end().to_string())
    }

    fn do_export(&self, format: &str) -> CampaignResult<String> {
        let name = if format.is_empty() { "markdown" } else { format };
        let format = ExportFormat::parse(name).ok_or_else(|| {
            CampaignError::InvalidChoice(format!(
                "unknown format '{name}', use: csv, json, markdown, text"
            ))
        })?;
        self.export(format)
    }

    fn do_ward(&mut self, rest: &str) -> CampaignResult<String> {
        if rest.is_empty() {
            return Ok(format!(
                "Current ward: {}\nWards: {}",
                self.ward,
                WARDS.join(", ")
            ));
        }
        let ward = self.set_ward(rest)?;
        Ok(format!("Ward set to {ward}."))
    }

    fn do_help(&self, topic: &str) -> CampaignResult<String> {
        match topic.to_lowercase().as_str() {
            "mission" | "missions" => Ok("\
Mission Commands:
  mission <archetype> [options]  Preview a mission at current heat
  queue [<archetype> [options]]  Queue the last preview (or a new one)
  resolve [notes]                Resolve the queued mission

Archetypes: help, sabotage, expose
Options:
  gold=N households=N            Help the Poor magnitude
  level=N                        Sabotage / Expose magnitude (1-5)
  margin=N crit fumble           Execution result
  plan contact rushed proof reused
                                 Ops flags
  vis=N noise=N sig=N wit=N magic=N conceal=N misdir=N
                                 Exposure components"
                .to_string()),
            "spin" | "wheel" => Ok("\
Complication Wheel:
  spin                           Draw and record a complication
  spin <index> <nonce>           Record a client-chosen spin (0-based index)

Resending a nonce returns the original complication without recording
it again. An index outside the current heat table must be re-spun."
                .to_string()),
            _ => Ok("\
Night Owls Commands:
  mission <archetype> [options]  Preview a mission
  queue                          Queue the previewed mission
  resolve [notes]                Resolve the queued mission
  lie-low                        Notoriety -1 (-2 under high heat)
  charity                        Proxy charity, Notoriety -1
  adjust <r> <n> <reason>        Custom adjustment
  spin [<index> <nonce>]         Spin the complication wheel
  status                         Show totals, tiers and heat
  perks                          Show unlocked Renown perks
  heat                           Show heat and the city's response
  ledger                         Show recent records
  export [csv|json|markdown|text]
                                 Export the ledger
  ward [name]                    Show or set the active ward
  help [topic]                   Show help (mission, spin)
  quit                           Exit"
                .to_string()),
        }
    }
}

/// Parse `<archetype> [key=value | flag]...` into mission inputs.
pub fn parse_mission(input: &str) -> CampaignResult<MissionInputs> {
    let usage = || {
        CampaignError::InvalidChoice(
            "usage: mission <help|sabotage|expose> [options] (see `help mission`)".to_string(),
        )
    };
    let mut tokens = input.split_whitespace();
    let archetype = tokens.next().and_then(Archetype::parse).ok_or_else(usage)?;

    let mut magnitude = Magnitude::default();
    let mut ops = OpsFlags::default();
    let mut execution = Execution::default();
    let mut exposure = ExposureBreakdown::default();

    for token in tokens {
        let lower = token.to_lowercase();
        if let Some((key, value)) = lower.split_once('=') {
            let bad = || CampaignError::InvalidChoice(format!("bad value in '{token}'"));
            let number = || saturating::parse_whole(value).ok_or_else(bad);
            match key {
                "gold" => magnitude.gold_spent = saturating::to_u32(number()?),
                "households" | "homes" => magnitude.households = saturating::to_u32(number()?),
                "level" | "impact" => magnitude.level = saturating::to_u8(number()?),
                "margin" => execution.margin = saturating::to_i32(number()?),
                "vis" | "visibility" => exposure.visibility = saturating::to_u8(number()?),
                "noise" => exposure.noise = saturating::to_u8(number()?),
                "sig" | "signature" => exposure.signature = saturating::to_u8(number()?),
                "wit" | "witnesses" => exposure.witnesses = saturating::to_u8(number()?),
                "magic" => exposure.magic = saturating::to_u8(number()?),
                "conceal" | "concealment" => exposure.concealment = saturating::to_u8(number()?),
                "misdir" | "misdirection" => exposure.misdirection = saturating::to_u8(number()?),
                _ => {
                    return Err(CampaignError::InvalidChoice(format!(
                        "unknown mission option '{key}'"
                    )));
                }
            }
            continue;
        }
        match lower.as_str() {
            "crit" | "critical" => execution.critical_success = true,
            "fumble" | "critfail" => execution.critical_failure = true,
            "plan" => ops.solid_plan = true,
            "contact" | "inside" => ops.inside_contact = true,
            "rushed" | "loud" => ops.rushed = true,
            "proof" => ops.hard_proof = true,
            "reused" => ops.reused_signature = true,
            _ => {
                return Err(CampaignError::InvalidChoice(format!(
                    "unknown mission flag '{token}'"
                )));
            }
        }
    }

    Ok(MissionInputs::new(archetype, magnitude)
        .with_ops(ops)
        .with_execution(execution)
        .with_exposure(exposure))
}
