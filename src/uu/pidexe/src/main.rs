uucore::bin!(uu_pidexe);
