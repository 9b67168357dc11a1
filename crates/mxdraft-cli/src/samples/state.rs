//! ATM state machine on a single page.
//!
//! Composite states are containers; their sub-states and inner transitions
//! are parented to them. Transitions that cross a composite boundary live on
//! the default layer.

use mxdraft::{
    Document, MxdraftError,
    geometry::Bounds,
    style::{ShapeCategory, StyleBuilder},
};

/// Adds the ATM state machine page to `doc`.
///
/// # Errors
///
/// Propagates [`MxdraftError::Document`] and [`MxdraftError::Style`]; the
/// fixed layout triggers neither.
pub fn build(doc: &mut Document) -> Result<(), MxdraftError> {
    let styles = doc.styles().clone();
    let state = styles.get(ShapeCategory::State);
    let composite = styles.get(ShapeCategory::CompositeState);
    let initial = styles.get(ShapeCategory::Initial);
    let final_state = styles.get(ShapeCategory::Final);
    let transition = Some(styles.get(ShapeCategory::Transition).clone());

    let page = doc.add_page("ATM - États (exemple)");

    let ini = doc.add_vertex(page, Bounds::new(60.0, 60.0, 18.0, 18.0), "", initial)?;
    let attente_carte = doc.add_vertex(
        page,
        Bounds::new(120.0, 50.0, 140.0, 60.0),
        "AttenteCarte",
        state,
    )?;
    let lecture_carte = doc.add_vertex(
        page,
        Bounds::new(340.0, 50.0, 160.0, 60.0),
        "LectureCarte",
        state,
    )?;
    let fin_session = doc.add_vertex(
        page,
        Bounds::new(1180.0, 420.0, 26.0, 26.0),
        "",
        final_state,
    )?;

    let attente_pin = doc.add_container(
        page,
        Bounds::new(560.0, 30.0, 340.0, 200.0),
        "AttentePIN",
        composite,
    )?;
    let pin_init = doc.add_child_vertex(
        page,
        attente_pin,
        Bounds::new(15.0, 18.0, 14.0, 14.0),
        "",
        initial,
    )?;
    let saisie = doc.add_child_vertex(
        page,
        attente_pin,
        Bounds::new(50.0, 10.0, 120.0, 50.0),
        "Saisie",
        state,
    )?;
    let pin_authentifie = doc.add_child_vertex(
        page,
        attente_pin,
        Bounds::new(220.0, 10.0, 110.0, 50.0),
        "Authentifié",
        state,
    )?;
    let retenir_carte = doc.add_child_vertex(
        page,
        attente_pin,
        Bounds::new(180.0, 90.0, 150.0, 50.0),
        "RetenirCarte",
        state,
    )?;

    let authentifie = doc.add_vertex(
        page,
        Bounds::new(940.0, 40.0, 130.0, 60.0),
        "Authentifié",
        state,
    )?;
    let selection_op = doc.add_vertex(
        page,
        Bounds::new(1120.0, 40.0, 140.0, 60.0),
        "SélectionOp",
        state,
    )?;

    let retrait = doc.add_container(
        page,
        Bounds::new(1120.0, 140.0, 260.0, 160.0),
        "RetraitEnCours",
        composite,
    )?;
    let ret_init = doc.add_child_vertex(
        page,
        retrait,
        Bounds::new(16.0, 22.0, 14.0, 14.0),
        "",
        initial,
    )?;
    let prelever = doc.add_child_vertex(
        page,
        retrait,
        Bounds::new(50.0, 10.0, 100.0, 50.0),
        "Prélever",
        state,
    )?;
    let ret_final = doc.add_child_vertex(
        page,
        retrait,
        Bounds::new(180.0, 16.0, 20.0, 20.0),
        "",
        final_state,
    )?;

    // Orthogonal regions are only suggested: two sub-states and a note.
    let transaction = doc.add_container(
        page,
        Bounds::new(720.0, 270.0, 350.0, 200.0),
        "Transaction",
        composite,
    )?;
    doc.add_child_vertex(
        page,
        transaction,
        Bounds::new(20.0, 20.0, 130.0, 50.0),
        "Préparation",
        state,
    )?;
    doc.add_child_vertex(
        page,
        transaction,
        Bounds::new(200.0, 20.0, 130.0, 50.0),
        "Impression",
        state,
    )?;
    let note = StyleBuilder::new()
        .shape("note")
        .set("whiteSpace", "wrap")
        .set("html", 1)
        .set("size", 14)
        .color("fillColor", "#fff2a8")?
        .color("strokeColor", "#b09500")?
        .build();
    doc.add_child_vertex(
        page,
        transaction,
        Bounds::new(20.0, 90.0, 310.0, 70.0),
        "Préparation et Impression en parallèle (conceptuel)",
        note,
    )?;

    let top_level = [
        (ini, attente_carte, ""),
        (attente_carte, lecture_carte, "carteInsérée / lirePiste()"),
        (lecture_carte, attente_pin, "carteValide / afficherÉcranPIN()"),
        (lecture_carte, fin_session, "carteInvalide / éjecterCarte()"),
    ];
    for (source, target, label) in top_level {
        doc.add_edge(page, source, target, label, transition.clone())?;
    }

    let inside_pin = [
        (pin_init, saisie, ""),
        (saisie, saisie, "pinInvalide / incTentatives()"),
        (saisie, pin_authentifie, "pinValide / resetTentatives()"),
        // Labels are HTML; the entity is part of the text.
        (saisie, retenir_carte, "tentatives&gt;3 / aspirerCarte()"),
    ];
    for (source, target, label) in inside_pin {
        doc.add_child_edge(page, attente_pin, source, target, label, transition.clone())?;
    }

    let crossing = [
        (attente_pin, fin_session, "after(30s) / éjecterCarte()"),
        (pin_authentifie, authentifie, ""),
        (authentifie, selection_op, "afficherMenu()"),
        (selection_op, retrait, "choisirRetrait(montant)"),
        (selection_op, fin_session, "annuler / éjecterCarte()"),
    ];
    for (source, target, label) in crossing {
        doc.add_edge(page, source, target, label, transition.clone())?;
    }

    doc.add_child_edge(page, retrait, ret_init, prelever, "", transition.clone())?;
    doc.add_child_edge(page, retrait, prelever, ret_final, "aprèsDébit", transition.clone())?;
    doc.add_edge(
        page,
        retrait,
        fin_session,
        "billetsRemis / remercierClient()",
        transition,
    )?;

    doc.add_vertex(
        page,
        Bounds::new(40.0, 10.0, 520.0, 30.0),
        "ATM - Diagramme d'États (exemple draw.io)",
        styles.get(ShapeCategory::Title),
    )?;

    Ok(())
}
