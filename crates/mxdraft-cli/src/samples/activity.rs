//! ATM activity diagrams, one page per notation topic.
//!
//! Pages cover basic nodes with guards, fork/join, object flows, partitions,
//! an interruptible region, signals, and a call behavior action. All cells
//! sit on the default layer; lanes and regions are background shapes.

use mxdraft::{
    Document, MxdraftError, PageHandle,
    geometry::Bounds,
    identifier::CellId,
    style::{ShapeCategory, Style, StyleBuilder, StyleRegistry},
};

const FLOW_BLUE: &str = "#1565c0";
const OBJECT_BLUE: &str = "#1e88e5";
const ALERT_RED: &str = "#d32f2f";
const SIGNAL_GREEN: &str = "#2e7d32";

/// Adds the seven activity pages to `doc`.
///
/// # Errors
///
/// Propagates [`MxdraftError::Document`] and [`MxdraftError::Style`]; the
/// built-in registry triggers neither.
pub fn build(doc: &mut Document) -> Result<(), MxdraftError> {
    let styles = doc.styles().clone();

    basic_elements(doc, &styles)?;
    fork_join(doc, &styles)?;
    object_flow(doc, &styles)?;
    partitions(doc, &styles)?;
    interruption(doc, &styles)?;
    signals(doc, &styles)?;
    call_behavior(doc, &styles)?;

    Ok(())
}

/// Adds an activity final node (ring plus filled centre) and returns the ring.
fn activity_final(
    doc: &mut Document,
    page: PageHandle,
    styles: &StyleRegistry,
    x: f64,
    y: f64,
) -> Result<CellId, MxdraftError> {
    let ring = doc.add_vertex(
        page,
        Bounds::new(x, y, 36.0, 36.0),
        "",
        styles.get(ShapeCategory::FlowFinal),
    )?;
    doc.add_vertex(
        page,
        Bounds::new(x + 8.0, y + 8.0, 20.0, 20.0),
        "",
        styles.get(ShapeCategory::FinalInner),
    )?;
    Ok(ring)
}

fn start(
    doc: &mut Document,
    page: PageHandle,
    styles: &StyleRegistry,
    x: f64,
    y: f64,
) -> Result<CellId, MxdraftError> {
    let id = doc.add_vertex(
        page,
        Bounds::new(x, y, 30.0, 30.0),
        "",
        styles.get(ShapeCategory::Start),
    )?;
    Ok(id)
}

/// Connects each pair with the default connector.
fn chain(
    doc: &mut Document,
    page: PageHandle,
    pairs: &[(CellId, CellId)],
) -> Result<(), MxdraftError> {
    for &(source, target) in pairs {
        doc.add_edge(page, source, target, "", None)?;
    }
    Ok(())
}

fn object_flow_style() -> Result<Style, MxdraftError> {
    Ok(StyleBuilder::new()
        .dashed(None)
        .color("strokeColor", OBJECT_BLUE)?
        .set("endArrow", "block")
        .set("endFill", 1)
        .build())
}

/// Coloured flow with a block arrowhead, optionally hollow or dashed.
fn flow_style(color: &str, filled: bool, dashed: bool) -> Result<Style, MxdraftError> {
    let builder = StyleBuilder::new()
        .color("strokeColor", color)?
        .set("endArrow", "block")
        .set("endFill", u8::from(filled));
    let builder = if dashed { builder.dashed(None) } else { builder };
    Ok(builder.build())
}

fn basic_elements(doc: &mut Document, styles: &StyleRegistry) -> Result<(), MxdraftError> {
    let action = styles.get(ShapeCategory::Action);
    let page = doc.add_page("Éléments de base — DAB Retrait");

    let start = start(doc, page, styles, 80.0, 120.0)?;
    let insert = doc.add_vertex(
        page,
        Bounds::new(150.0, 110.0, 180.0, 50.0),
        "Insérer la carte",
        action,
    )?;
    let pin = doc.add_vertex(
        page,
        Bounds::new(380.0, 110.0, 200.0, 50.0),
        "Saisir le code PIN",
        action,
    )?;
    let check_pin = doc.add_vertex(
        page,
        Bounds::new(620.0, 110.0, 120.0, 60.0),
        "PIN valide ?",
        styles.get(ShapeCategory::Decision),
    )?;
    let menu = doc.add_vertex(
        page,
        Bounds::new(800.0, 110.0, 220.0, 50.0),
        "Afficher le menu",
        action,
    )?;
    let done = activity_final(doc, page, styles, 1080.0, 110.0)?;

    // Flow final: a blue ring crossed by two strokes.
    let ring = StyleBuilder::from_style(styles.get(ShapeCategory::FlowFinal))
        .color("strokeColor", FLOW_BLUE)?
        .build();
    let flow_final = doc.add_vertex(page, Bounds::new(680.0, 260.0, 36.0, 36.0), "", ring)?;
    let stroke = StyleBuilder::new()
        .shape("line")
        .stroke_width(3.0)
        .color("strokeColor", FLOW_BLUE)?;
    let cross = Bounds::new(696.0, 276.0, 24.0, 4.0);
    doc.add_vertex(page, cross, "", stroke.clone().build())?;
    doc.add_vertex(page, cross, "", stroke.set("rotation", 90).build())?;

    let retry = doc.add_vertex(
        page,
        Bounds::new(500.0, 260.0, 200.0, 50.0),
        "Afficher erreur PIN",
        action,
    )?;
    let merge = doc.add_vertex(
        page,
        Bounds::new(950.0, 190.0, 120.0, 60.0),
        "Continuer",
        styles.get(ShapeCategory::Merge),
    )?;

    chain(doc, page, &[(start, insert), (insert, pin), (pin, check_pin)])?;
    doc.add_edge(page, check_pin, menu, "[valide]", None)?;
    doc.add_edge(page, check_pin, retry, "[invalide]", None)?;

    let ends_flow = StyleBuilder::new()
        .set("endArrow", "oval")
        .set("endFill", 0)
        .color("strokeColor", FLOW_BLUE)?
        .build();
    doc.add_edge(page, retry, flow_final, "", Some(ends_flow))?;
    chain(doc, page, &[(menu, merge), (merge, done)])?;

    doc.add_vertex(
        page,
        Bounds::new(70.0, 50.0, 360.0, 40.0),
        "Exemple: transitions avec gardes [valide]/[invalide]",
        styles.get(ShapeCategory::Note),
    )?;

    Ok(())
}

fn fork_join(doc: &mut Document, styles: &StyleRegistry) -> Result<(), MxdraftError> {
    let action = styles.get(ShapeCategory::Action);
    let bar = styles.get(ShapeCategory::Bar);
    let page = doc.add_page("Parallélisme — Comptes et Journal");

    let start = start(doc, page, styles, 80.0, 120.0)?;
    let select = doc.add_vertex(
        page,
        Bounds::new(140.0, 105.0, 240.0, 50.0),
        "Choisir ‘Retrait’",
        action,
    )?;
    let fork = doc.add_vertex(page, Bounds::new(410.0, 120.0, 160.0, 8.0), "", bar)?;
    let balance = doc.add_vertex(
        page,
        Bounds::new(620.0, 60.0, 260.0, 50.0),
        "Vérifier solde (banque)",
        action,
    )?;
    let journal = doc.add_vertex(
        page,
        Bounds::new(620.0, 160.0, 260.0, 50.0),
        "Écrire entrée journal",
        action,
    )?;
    let join = doc.add_vertex(page, Bounds::new(920.0, 120.0, 160.0, 8.0), "", bar)?;
    let confirm = doc.add_vertex(
        page,
        Bounds::new(1110.0, 105.0, 260.0, 50.0),
        "Afficher confirmation",
        action,
    )?;
    let done = activity_final(doc, page, styles, 1410.0, 110.0)?;

    chain(
        doc,
        page,
        &[
            (start, select),
            (select, fork),
            (fork, balance),
            (fork, journal),
            (balance, join),
            (journal, join),
            (join, confirm),
            (confirm, done),
        ],
    )
}

fn object_flow(doc: &mut Document, styles: &StyleRegistry) -> Result<(), MxdraftError> {
    let action = styles.get(ShapeCategory::Action);
    let object = styles.get(ShapeCategory::Object);
    let page = doc.add_page("Flux d’objet — Billets & Reçu");

    let start = start(doc, page, styles, 80.0, 140.0)?;
    let split = doc.add_vertex(
        page,
        Bounds::new(140.0, 125.0, 260.0, 50.0),
        "Calculer la répartition des billets",
        action,
    )?;
    let notes = doc.add_vertex(
        page,
        Bounds::new(450.0, 100.0, 200.0, 60.0),
        "Obj: LotBillets",
        object,
    )?;
    let dispense = doc.add_vertex(
        page,
        Bounds::new(700.0, 125.0, 260.0, 50.0),
        "Distribuer les billets",
        action,
    )?;
    let receipt = doc.add_vertex(
        page,
        Bounds::new(700.0, 230.0, 220.0, 50.0),
        "Obj: ReçuPDF",
        object,
    )?;
    let print = doc.add_vertex(
        page,
        Bounds::new(980.0, 225.0, 240.0, 50.0),
        "Imprimer le reçu",
        action,
    )?;
    let done = activity_final(doc, page, styles, 1260.0, 130.0)?;

    let flow = object_flow_style()?;
    doc.add_edge(page, start, split, "", None)?;
    doc.add_edge(page, split, notes, "«objectFlow»", Some(flow.clone()))?;
    doc.add_edge(page, notes, dispense, "«objectFlow»", Some(flow.clone()))?;
    doc.add_edge(page, dispense, done, "", None)?;
    doc.add_edge(page, dispense, receipt, "«objectFlow»", Some(flow.clone()))?;
    doc.add_edge(page, receipt, print, "«objectFlow»", Some(flow))?;

    Ok(())
}

fn partitions(doc: &mut Document, styles: &StyleRegistry) -> Result<(), MxdraftError> {
    let action = styles.get(ShapeCategory::Action);
    let lane = styles.get(ShapeCategory::Swimlane);
    let page = doc.add_page("Partitions — Client / DAB / Banque");

    for (x, width, label) in [(40.0, 450.0, "Client"), (520.0, 500.0, "DAB"), (1040.0, 500.0, "Banque")] {
        doc.add_vertex(page, Bounds::new(x, 60.0, width, 700.0), label, lane)?;
    }

    let start = start(doc, page, styles, 80.0, 140.0)?;
    let client = doc.add_vertex(
        page,
        Bounds::new(120.0, 125.0, 360.0, 50.0),
        "Composer le PIN",
        action,
    )?;
    let atm = doc.add_vertex(
        page,
        Bounds::new(560.0, 125.0, 420.0, 50.0),
        "Vérifier PIN",
        action,
    )?;
    let bank = doc.add_vertex(
        page,
        Bounds::new(1080.0, 125.0, 420.0, 50.0),
        "Autoriser l’opération",
        action,
    )?;
    let done = activity_final(doc, page, styles, 1530.0, 130.0)?;

    chain(
        doc,
        page,
        &[(start, client), (client, atm), (atm, bank), (bank, done)],
    )
}

fn interruption(doc: &mut Document, styles: &StyleRegistry) -> Result<(), MxdraftError> {
    let action = styles.get(ShapeCategory::Action);
    let page = doc.add_page("Interruption — Carte avalée");

    doc.add_vertex(
        page,
        Bounds::new(120.0, 80.0, 1000.0, 420.0),
        "Région interruptible",
        styles.get(ShapeCategory::Interruptible),
    )?;
    let start = start(doc, page, styles, 160.0, 140.0)?;
    let read = doc.add_vertex(
        page,
        Bounds::new(210.0, 125.0, 260.0, 50.0),
        "Lire la carte",
        action,
    )?;
    let session = doc.add_vertex(
        page,
        Bounds::new(500.0, 125.0, 260.0, 50.0),
        "Démarrer session",
        action,
    )?;
    let wait = doc.add_vertex(
        page,
        Bounds::new(800.0, 125.0, 260.0, 50.0),
        "Attendre saisie PIN",
        action,
    )?;
    let retained = doc.add_vertex(
        page,
        Bounds::new(520.0, 280.0, 260.0, 50.0),
        "«exception» Carte retenue",
        action,
    )?;
    let done = activity_final(doc, page, styles, 900.0, 280.0)?;

    chain(doc, page, &[(start, read), (read, session), (session, wait)])?;
    doc.add_edge(page, wait, retained, "", Some(flow_style(ALERT_RED, false, true)?))?;
    doc.add_edge(page, retained, done, "", Some(flow_style(ALERT_RED, true, false)?))?;

    Ok(())
}

fn signals(doc: &mut Document, styles: &StyleRegistry) -> Result<(), MxdraftError> {
    let action = styles.get(ShapeCategory::Action);
    let signal = styles.get(ShapeCategory::Signal);
    let page = doc.add_page("Signal/Événement — Maintenance");

    let start = start(doc, page, styles, 80.0, 140.0)?;
    let idle = doc.add_vertex(
        page,
        Bounds::new(140.0, 125.0, 260.0, 50.0),
        "Attendre client",
        action,
    )?;
    let receive = doc.add_vertex(
        page,
        Bounds::new(470.0, 80.0, 220.0, 50.0),
        "«receiveSignal»\nSignal: ModeMaintenance",
        signal,
    )?;
    let send = doc.add_vertex(
        page,
        Bounds::new(470.0, 220.0, 220.0, 50.0),
        "«sendSignal»\nSignal: AlerteGuichet",
        signal,
    )?;
    let switch = doc.add_vertex(
        page,
        Bounds::new(740.0, 125.0, 280.0, 50.0),
        "Basculer en mode maintenance",
        action,
    )?;
    let done = activity_final(doc, page, styles, 1060.0, 130.0)?;

    let dashed = flow_style(SIGNAL_GREEN, true, true)?;
    doc.add_edge(page, start, idle, "", None)?;
    doc.add_edge(page, idle, receive, "", Some(dashed.clone()))?;
    doc.add_edge(page, receive, switch, "", Some(flow_style(SIGNAL_GREEN, true, false)?))?;
    doc.add_edge(page, switch, done, "", None)?;
    doc.add_edge(page, idle, send, "", Some(dashed))?;

    Ok(())
}

fn call_behavior(doc: &mut Document, styles: &StyleRegistry) -> Result<(), MxdraftError> {
    let action = styles.get(ShapeCategory::Action);
    let page = doc.add_page("Sous-activité — Appel d’activité");

    let start = start(doc, page, styles, 80.0, 140.0)?;
    let verify = doc.add_vertex(
        page,
        Bounds::new(140.0, 125.0, 300.0, 60.0),
        "Vérifier identité\n«callBehavior»",
        action.with("strokeWidth", "2"),
    )?;
    let marker = StyleBuilder::new()
        .shape("triangle")
        .set("direction", "east")
        .color("fillColor", FLOW_BLUE)?
        .color("strokeColor", FLOW_BLUE)?
        .build();
    doc.add_vertex(page, Bounds::new(410.0, 150.0, 14.0, 14.0), "", marker)?;
    let called = doc.add_vertex(
        page,
        Bounds::new(500.0, 120.0, 320.0, 60.0),
        "Activité appelée: Vérification KYC",
        action,
    )?;
    let done = activity_final(doc, page, styles, 860.0, 130.0)?;

    chain(doc, page, &[(start, verify), (verify, called), (called, done)])
}
